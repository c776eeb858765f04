//! UI state - which view is mounted

/// The two top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Tables,
    Compiler,
}

impl View {
    pub fn all() -> [View; 2] {
        [View::Tables, View::Compiler]
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Tables => "Data API",
            View::Compiler => "Data Compiler",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Tables => 0,
            View::Compiler => 1,
        }
    }

    pub fn next(&self) -> View {
        let views = View::all();
        views[(self.index() + 1) % views.len()]
    }

    pub fn previous(&self) -> View {
        let views = View::all();
        views[(self.index() + views.len() - 1) % views.len()]
    }
}
