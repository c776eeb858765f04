//! Table browser orchestrator
//!
//! Owns the table listing, the current selection and its rows. Requests run
//! through one `RequestRunner` per request kind; every request is tagged with
//! the generation it was issued under and completions from an older
//! generation are dropped, so whatever the user did last is what ends up on
//! screen regardless of the order replies arrive in. A request whose worker
//! died counts as a transport failure.

use super::outcome::{classify, RequestOutcome};
use super::schema::{TableData, TableListResponse};
use crate::services::gateway::DataApi;
use crate::services::request_runner::RequestRunner;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::sync::Arc;

pub const LIST_ERROR: &str = "Failed to retrieve database table list";
pub const DATA_ERROR: &str = "Failed to retrieve data";

pub struct TableBrowser {
    gateway: Arc<dyn DataApi>,
    list_runner: RequestRunner<RequestOutcome<TableListResponse>>,
    data_runner: RequestRunner<RequestOutcome<TableData>>,

    list_loading: bool,
    data_loading: bool,
    /// A list load has completed at least once since the last reload began
    list_loaded: bool,

    tables: Vec<String>,
    selected: Option<String>,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    error: Option<String>,

    list_generation: u64,
    data_generation: u64,

    /// Classification of the most recently applied (or issued) request
    last_outcome: Option<RequestOutcome<()>>,
    listed_at: Option<DateTime<Local>>,
}

impl TableBrowser {
    pub fn new(gateway: Arc<dyn DataApi>) -> Self {
        Self {
            gateway,
            list_runner: RequestRunner::new(),
            data_runner: RequestRunner::new(),
            list_loading: false,
            data_loading: false,
            list_loaded: false,
            tables: Vec::new(),
            selected: None,
            columns: Vec::new(),
            rows: Vec::new(),
            error: None,
            list_generation: 0,
            data_generation: 0,
            last_outcome: None,
            listed_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the table list, discarding everything currently shown
    pub fn load_table_list(&mut self) {
        let generation = self.begin_list_load();
        let gateway = Arc::clone(&self.gateway);

        tracing::info!(generation, "loading table list");
        self.list_runner
            .spawn(generation, move || classify(gateway.list_tables()));
    }

    /// Select `name` and fetch its rows. Names are not checked against the listing.
    pub fn select_table(&mut self, name: &str) {
        let generation = self.begin_select(name);
        let gateway = Arc::clone(&self.gateway);
        let table = name.to_string();

        tracing::info!(generation, table = %name, "loading table data");
        self.data_runner
            .spawn(generation, move || classify(gateway.table_data(&table)));
    }

    /// Apply every completion that has arrived. Returns true if state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        for completion in self.list_runner.poll() {
            let outcome = completion.result.unwrap_or_else(RequestOutcome::TransportFailure);
            changed |= self.apply_list_outcome(completion.ticket, outcome);
        }
        for completion in self.data_runner.poll() {
            let outcome = completion.result.unwrap_or_else(RequestOutcome::TransportFailure);
            changed |= self.apply_data_outcome(completion.ticket, outcome);
        }
        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    fn begin_list_load(&mut self) -> u64 {
        self.list_generation += 1;
        // Any row fetch still out belongs to a selection that is about to vanish
        self.data_generation += 1;

        self.list_loading = true;
        self.list_loaded = false;
        self.data_loading = false;
        self.error = None;
        self.tables.clear();
        self.selected = None;
        self.columns.clear();
        self.rows.clear();
        self.last_outcome = Some(RequestOutcome::Pending);

        self.list_generation
    }

    fn begin_select(&mut self, name: &str) -> u64 {
        self.data_generation += 1;

        self.data_loading = true;
        self.selected = Some(name.to_string());
        self.error = None;
        self.columns.clear();
        self.rows.clear();
        self.last_outcome = Some(RequestOutcome::Pending);

        self.data_generation
    }

    fn apply_list_outcome(
        &mut self,
        generation: u64,
        outcome: RequestOutcome<TableListResponse>,
    ) -> bool {
        if generation != self.list_generation {
            tracing::debug!(
                generation,
                current = self.list_generation,
                "dropping stale table list completion"
            );
            return false;
        }
        if outcome.is_pending() {
            return false;
        }

        self.list_loading = false;
        self.list_loaded = true;
        self.last_outcome = Some(outcome.without_payload());

        match outcome {
            RequestOutcome::Success(listing) => {
                tracing::info!(count = listing.database_tables.len(), "table list loaded");
                self.tables = listing.database_tables;
                self.listed_at = Some(Local::now());
            }
            RequestOutcome::Rejected { status, .. } => {
                tracing::warn!(status, "table list request rejected");
                self.error = Some(LIST_ERROR.to_string());
            }
            RequestOutcome::TransportFailure(cause) => {
                tracing::warn!(%cause, "table list request failed");
                self.error = Some(LIST_ERROR.to_string());
            }
            RequestOutcome::Pending => {}
        }
        true
    }

    fn apply_data_outcome(&mut self, generation: u64, outcome: RequestOutcome<TableData>) -> bool {
        if generation != self.data_generation {
            tracing::debug!(
                generation,
                current = self.data_generation,
                "dropping stale table data completion"
            );
            return false;
        }
        if outcome.is_pending() {
            return false;
        }

        self.data_loading = false;
        self.last_outcome = Some(outcome.without_payload());
        let table = self.selected.as_deref().unwrap_or_default();

        match outcome {
            RequestOutcome::Success(data) if data.is_well_formed() => {
                tracing::info!(
                    table,
                    columns = data.columns.len(),
                    rows = data.rows.len(),
                    "table data loaded"
                );
                self.columns = data.columns;
                self.rows = data.rows;
            }
            RequestOutcome::Success(data) => {
                tracing::warn!(
                    table,
                    columns = data.columns.len(),
                    "table data has rows that do not match the column count"
                );
                self.error = Some(DATA_ERROR.to_string());
            }
            RequestOutcome::Rejected { status, .. } => {
                tracing::warn!(table, status, "table data request rejected");
                self.error = Some(DATA_ERROR.to_string());
            }
            RequestOutcome::TransportFailure(cause) => {
                tracing::warn!(table, %cause, "table data request failed");
                self.error = Some(DATA_ERROR.to_string());
            }
            RequestOutcome::Pending => {}
        }
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors & derived display state
    // ─────────────────────────────────────────────────────────────────────────

    pub fn list_loading(&self) -> bool {
        self.list_loading
    }

    pub fn data_loading(&self) -> bool {
        self.data_loading
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.as_deref() == Some(name)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_outcome(&self) -> Option<&RequestOutcome<()>> {
        self.last_outcome.as_ref()
    }

    pub fn listed_at(&self) -> Option<DateTime<Local>> {
        self.listed_at
    }

    /// Requests spawned whose completion has not been polled yet
    pub fn is_busy(&self) -> bool {
        self.list_runner.in_flight() + self.data_runner.in_flight() > 0
    }

    /// The list load finished and there is nothing to show, without an error
    pub fn shows_no_tables(&self) -> bool {
        self.list_loaded && !self.list_loading && self.tables.is_empty() && self.error.is_none()
    }

    /// A selection's fetch finished with zero rows and no error
    pub fn shows_no_data(&self) -> bool {
        self.selected.is_some() && !self.data_loading && self.rows.is_empty() && self.error.is_none()
    }

    /// A selection's fetch finished with rows to render
    pub fn shows_rows(&self) -> bool {
        self.selected.is_some() && !self.data_loading && !self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gateway::{GatewayError, HttpReply};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};

    type Reply = Result<HttpReply, GatewayError>;

    fn ok(body: &str) -> Reply {
        Ok(HttpReply {
            status: 200,
            body: body.to_string(),
        })
    }

    fn status(code: u16) -> Reply {
        Ok(HttpReply {
            status: code,
            body: r#"{"detail":"nope"}"#.to_string(),
        })
    }

    fn refused() -> Reply {
        Err(GatewayError::Transport {
            url: "http://localhost:4000".to_string(),
            reason: "connection refused".to_string(),
        })
    }

    /// Replays queued list replies and fixed per-table replies
    #[derive(Default)]
    struct ScriptedDataApi {
        lists: Mutex<VecDeque<Reply>>,
        data: HashMap<String, Reply>,
    }

    impl ScriptedDataApi {
        fn with_list(reply: Reply) -> Self {
            let api = Self::default();
            api.lists.lock().unwrap().push_back(reply);
            api
        }

        fn table(mut self, name: &str, reply: Reply) -> Self {
            self.data.insert(name.to_string(), reply);
            self
        }
    }

    impl DataApi for ScriptedDataApi {
        fn list_tables(&self) -> Reply {
            self.lists.lock().unwrap().pop_front().unwrap_or_else(refused)
        }

        fn table_data(&self, table: &str) -> Reply {
            self.data.get(table).cloned().unwrap_or_else(|| status(404))
        }
    }

    /// Holds the reply for `gated` until the test releases it
    struct GatedDataApi {
        gated: String,
        release: Mutex<Receiver<()>>,
    }

    impl DataApi for GatedDataApi {
        fn list_tables(&self) -> Reply {
            ok(r#"{"database_tables":["a","b"]}"#)
        }

        fn table_data(&self, table: &str) -> Reply {
            if table == self.gated {
                let _ = self.release.lock().unwrap().recv();
            }
            ok(&format!(r#"{{"columns":["table"],"rows":[["{}"]]}}"#, table))
        }
    }

    fn browser(api: impl DataApi + 'static) -> TableBrowser {
        TableBrowser::new(Arc::new(api))
    }

    fn settle(browser: &mut TableBrowser) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            browser.poll();
            if !browser.is_busy() {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("requests did not settle");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Table list
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_list_success_keeps_order() {
        let mut b = browser(ScriptedDataApi::with_list(ok(
            r#"{"database_tables":["zeta","alpha","mid"]}"#,
        )));

        b.load_table_list();
        assert!(b.list_loading());
        settle(&mut b);

        assert!(!b.list_loading());
        assert_eq!(b.tables(), ["zeta", "alpha", "mid"]);
        assert!(b.error().is_none());
        assert!(!b.shows_no_tables());
        assert!(b.listed_at().is_some());
        assert_eq!(b.last_outcome(), Some(&RequestOutcome::Success(())));
    }

    #[test]
    fn test_list_rejection_sets_list_error() {
        let mut b = browser(ScriptedDataApi::with_list(status(500)));

        b.load_table_list();
        settle(&mut b);

        assert!(b.tables().is_empty());
        assert_eq!(b.error(), Some(LIST_ERROR));
        assert!(!b.list_loading());
        assert!(!b.shows_no_tables());
    }

    #[test]
    fn test_list_transport_failure_matches_rejection() {
        let mut b = browser(ScriptedDataApi::with_list(refused()));

        b.load_table_list();
        settle(&mut b);

        assert!(b.tables().is_empty());
        assert_eq!(b.error(), Some(LIST_ERROR));
        assert!(matches!(
            b.last_outcome(),
            Some(RequestOutcome::TransportFailure(_))
        ));
    }

    #[test]
    fn test_empty_list_shows_no_tables() {
        let mut b = browser(ScriptedDataApi::with_list(ok(r#"{"database_tables":[]}"#)));
        assert!(!b.shows_no_tables(), "nothing loaded yet");

        b.load_table_list();
        assert!(!b.shows_no_tables(), "still loading");
        settle(&mut b);

        assert!(b.shows_no_tables());
        assert!(b.error().is_none());
    }

    #[test]
    fn test_reload_clears_previous_state() {
        let api = ScriptedDataApi::with_list(ok(r#"{"database_tables":["t1"]}"#))
            .table("t1", ok(r#"{"columns":["id"],"rows":[[1]]}"#));
        let mut b = browser(api);
        b.load_table_list();
        settle(&mut b);
        b.select_table("t1");
        settle(&mut b);
        assert!(b.shows_rows());

        // No more scripted lists, so the reload fails
        b.load_table_list();
        assert!(b.list_loading());
        assert!(b.tables().is_empty());
        assert!(b.selected().is_none());
        assert!(b.columns().is_empty());
        assert!(b.rows().is_empty());
        assert!(b.error().is_none());
        settle(&mut b);

        assert_eq!(b.error(), Some(LIST_ERROR));
    }

    #[test]
    fn test_exactly_one_list_postcondition_holds() {
        for reply in [
            ok(r#"{"database_tables":["x"]}"#),
            ok(r#"{"database_tables":[]}"#),
            status(503),
            refused(),
        ] {
            let mut b = browser(ScriptedDataApi::with_list(reply));
            b.load_table_list();
            settle(&mut b);

            let has_tables = !b.tables().is_empty();
            let has_error = b.error().is_some();
            let both_empty = b.tables().is_empty() && !has_error && !b.list_loading();
            assert_eq!(
                [has_tables, has_error, both_empty].iter().filter(|c| **c).count(),
                1
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_select_scenario_two_tables() {
        let api = ScriptedDataApi::with_list(ok(r#"{"database_tables":["t1","t2"]}"#)).table(
            "t2",
            ok(r#"{"columns":["id","name"],"rows":[[1,"a"],[2,"b"]]}"#),
        );
        let mut b = browser(api);

        b.load_table_list();
        settle(&mut b);
        assert_eq!(b.tables().len(), 2);
        assert!(b.error().is_none());

        b.select_table("t2");
        assert!(b.data_loading());
        assert!(!b.shows_rows());
        settle(&mut b);

        assert_eq!(b.columns(), ["id", "name"]);
        assert_eq!(
            b.rows(),
            [vec![json!(1), json!("a")], vec![json!(2), json!("b")]]
        );
        assert!(b.is_selected("t2"));
        assert!(!b.is_selected("t1"));
        assert!(b.shows_rows());
        assert!(!b.shows_no_data());
    }

    #[test]
    fn test_empty_table_is_no_data_not_error() {
        let api = ScriptedDataApi::default()
            .table("empty", ok(r#"{"columns":[],"rows":[]}"#))
            .table("headers_only", ok(r#"{"columns":["id"],"rows":[]}"#));
        let mut b = browser(api);

        for name in ["empty", "headers_only"] {
            b.select_table(name);
            settle(&mut b);
            assert!(b.error().is_none(), "{}", name);
            assert!(b.shows_no_data(), "{}", name);
            assert!(!b.shows_rows(), "{}", name);
        }
    }

    #[test]
    fn test_select_failures_set_data_error() {
        let api = ScriptedDataApi::default()
            .table("rejected", status(500))
            .table("unreachable", refused())
            .table("ragged", ok(r#"{"columns":["a","b"],"rows":[[1]]}"#));
        let mut b = browser(api);

        for name in ["rejected", "unreachable", "ragged"] {
            b.select_table(name);
            settle(&mut b);
            assert_eq!(b.error(), Some(DATA_ERROR), "{}", name);
            assert!(b.columns().is_empty(), "{}", name);
            assert!(b.rows().is_empty(), "{}", name);
            assert!(!b.shows_no_data(), "{}", name);
            assert!(b.is_selected(name));
        }
    }

    #[test]
    fn test_unknown_name_is_still_fetched() {
        let mut b = browser(ScriptedDataApi::default());
        b.select_table("not_listed");
        assert!(b.is_selected("not_listed"));
        settle(&mut b);
        assert_eq!(b.error(), Some(DATA_ERROR));
    }

    #[test]
    fn test_selection_clears_previous_error() {
        let api = ScriptedDataApi::default()
            .table("bad", status(500))
            .table("good", ok(r#"{"columns":["id"],"rows":[[1]]}"#));
        let mut b = browser(api);

        b.select_table("bad");
        settle(&mut b);
        assert!(b.error().is_some());

        b.select_table("good");
        assert!(b.error().is_none());
        settle(&mut b);
        assert!(b.shows_rows());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ordering
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_late_reply_for_earlier_selection_is_dropped() {
        let mut b = browser(ScriptedDataApi::default());

        let first = b.begin_select("a");
        let second = b.begin_select("b");

        let b_data = TableData {
            columns: vec!["id".to_string()],
            rows: vec![vec![json!("from b")]],
        };
        assert!(b.apply_data_outcome(second, RequestOutcome::Success(b_data.clone())));

        let a_data = TableData {
            columns: vec!["id".to_string()],
            rows: vec![vec![json!("from a")]],
        };
        assert!(!b.apply_data_outcome(first, RequestOutcome::Success(a_data)));

        assert!(b.is_selected("b"));
        assert_eq!(b.rows(), b_data.rows.as_slice());
    }

    #[test]
    fn test_stale_failure_does_not_set_error() {
        let mut b = browser(ScriptedDataApi::default());

        let first = b.begin_select("a");
        let second = b.begin_select("b");

        assert!(!b.apply_data_outcome(first, RequestOutcome::TransportFailure("late".to_string())));
        assert!(b.error().is_none());
        assert!(b.data_loading(), "b is still outstanding");

        assert!(b.apply_data_outcome(
            second,
            RequestOutcome::Success(TableData::default())
        ));
        assert!(b.shows_no_data());
    }

    #[test]
    fn test_reload_drops_pending_row_fetch() {
        let mut b = browser(ScriptedDataApi::default());

        let select = b.begin_select("a");
        let list = b.begin_list_load();

        assert!(!b.apply_data_outcome(select, RequestOutcome::Success(TableData::default())));
        assert!(b.selected().is_none());
        assert!(!b.data_loading());

        assert!(b.apply_list_outcome(
            list,
            RequestOutcome::Success(TableListResponse {
                database_tables: vec!["a".to_string()]
            })
        ));
        assert_eq!(b.tables(), ["a"]);
    }

    #[test]
    fn test_older_list_load_is_dropped() {
        let mut b = browser(ScriptedDataApi::default());

        let first = b.begin_list_load();
        let second = b.begin_list_load();

        assert!(b.apply_list_outcome(second, RequestOutcome::Rejected { status: 500, message: None }));
        assert!(!b.apply_list_outcome(
            first,
            RequestOutcome::Success(TableListResponse {
                database_tables: vec!["old".to_string()]
            })
        ));

        assert!(b.tables().is_empty());
        assert_eq!(b.error(), Some(LIST_ERROR));
    }

    #[test]
    fn test_out_of_order_completion_across_threads() {
        let (release_tx, release_rx) = mpsc::channel();
        let mut b = browser(GatedDataApi {
            gated: "a".to_string(),
            release: Mutex::new(release_rx),
        });

        b.select_table("a");
        b.select_table("b");

        // b finishes while a is still held back
        let deadline = Instant::now() + Duration::from_secs(5);
        while b.data_loading() && Instant::now() < deadline {
            b.poll();
            thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(b.rows(), [vec![json!("b")]]);

        release_tx.send(()).unwrap();
        settle(&mut b);

        assert!(b.is_selected("b"));
        assert_eq!(b.rows(), [vec![json!("b")]]);
        assert!(b.error().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Worker failures
    // ─────────────────────────────────────────────────────────────────────────

    /// Panics inside the gateway, as a bug in a client would
    struct PanickingDataApi;

    impl DataApi for PanickingDataApi {
        fn list_tables(&self) -> Reply {
            panic!("list decoder bug")
        }

        fn table_data(&self, _table: &str) -> Reply {
            panic!("row decoder bug")
        }
    }

    #[test]
    fn test_panicking_row_fetch_ends_in_data_error() {
        let mut b = browser(PanickingDataApi);

        b.select_table("a");
        settle(&mut b);

        assert!(!b.data_loading());
        assert!(!b.is_busy());
        assert_eq!(b.error(), Some(DATA_ERROR));
        assert!(matches!(
            b.last_outcome(),
            Some(RequestOutcome::TransportFailure(cause)) if cause.contains("row decoder bug")
        ));
    }

    #[test]
    fn test_panicking_list_load_ends_in_list_error() {
        let mut b = browser(PanickingDataApi);

        b.load_table_list();
        settle(&mut b);

        assert!(!b.list_loading());
        assert!(b.tables().is_empty());
        assert_eq!(b.error(), Some(LIST_ERROR));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────────

    fn cell() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[ -~]{0,12}".prop_map(Value::from),
        ]
    }

    /// Column names and rows that all have exactly one cell per column
    fn well_formed_table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<Value>>)> {
        (0usize..5).prop_flat_map(|width| {
            (
                prop::collection::vec("[a-z_]{1,8}", width),
                prop::collection::vec(prop::collection::vec(cell(), width), 0..8),
            )
        })
    }

    /// Per selection, the index of the selection after which its reply lands
    fn selection_schedule() -> impl Strategy<Value = (Vec<usize>, bool)> {
        (1usize..8).prop_flat_map(|count| {
            let landing = (0..count)
                .map(move |i| (i..count).boxed())
                .collect::<Vec<_>>();
            (landing, any::<bool>())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_list_keeps_service_order(
            names in prop::collection::vec("[A-Za-z0-9_]{1,12}", 0..16)
        ) {
            let body = json!({ "database_tables": names }).to_string();
            let mut b = browser(ScriptedDataApi::with_list(ok(&body)));

            b.load_table_list();
            settle(&mut b);

            prop_assert_eq!(b.tables(), names.as_slice());
            prop_assert!(b.error().is_none());
            prop_assert_eq!(b.shows_no_tables(), names.is_empty());
        }

        #[test]
        fn prop_well_formed_rows_are_shown_as_sent((columns, rows) in well_formed_table()) {
            let body = json!({ "columns": columns, "rows": rows }).to_string();
            let mut b = browser(ScriptedDataApi::default());

            let generation = b.begin_select("t");
            prop_assert!(b.apply_data_outcome(generation, classify(ok(&body))));

            prop_assert!(b.error().is_none());
            prop_assert_eq!(b.columns(), columns.as_slice());
            prop_assert_eq!(b.rows(), rows.as_slice());
            prop_assert_eq!(b.shows_rows(), !rows.is_empty());
            prop_assert_eq!(b.shows_no_data(), rows.is_empty());
        }

        #[test]
        fn prop_only_latest_selection_lands((landing, reverse) in selection_schedule()) {
            let mut b = browser(ScriptedDataApi::default());
            let count = landing.len();
            let mut generations = Vec::with_capacity(count);

            for current in 0..count {
                generations.push(b.begin_select(&format!("t{}", current)));

                let mut due: Vec<usize> = (0..count).filter(|i| landing[*i] == current).collect();
                if reverse {
                    due.reverse();
                }
                for i in due {
                    let data = TableData {
                        columns: vec!["from".to_string()],
                        rows: vec![vec![json!(i)]],
                    };
                    let applied = b.apply_data_outcome(generations[i], RequestOutcome::Success(data));
                    prop_assert_eq!(applied, i == current);
                }
            }

            let last = count - 1;
            let expected_name = format!("t{}", last);
            prop_assert!(b.is_selected(&expected_name));
            prop_assert!(!b.data_loading());
            prop_assert_eq!(b.rows(), [vec![json!(last)]]);
        }
    }
}
