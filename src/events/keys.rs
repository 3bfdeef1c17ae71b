//! Key binding table, shown by the help screen.

/// Where a binding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    Results,
    SearchInput,
    TagEditor,
    RefineSearch,
}

impl KeyContext {
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Global => "Global",
            KeyContext::Results => "Results",
            KeyContext::SearchInput => "Search input",
            KeyContext::TagEditor => "Tag editor",
            KeyContext::RefineSearch => "Refine search",
        }
    }

    /// Display order on the help screen.
    pub fn all() -> [KeyContext; 5] {
        [
            KeyContext::Global,
            KeyContext::Results,
            KeyContext::SearchInput,
            KeyContext::TagEditor,
            KeyContext::RefineSearch,
        ]
    }
}

/// One documented binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: &'static str,
    pub description: &'static str,
    pub context: KeyContext,
}

const fn bind(key: &'static str, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        key,
        description,
        context,
    }
}

/// Every binding the app handles.
pub fn get_keybindings() -> Vec<Keybinding> {
    use KeyContext::*;

    vec![
        bind("q / Ctrl+c", "Quit", Global),
        bind("?", "Toggle help", Global),
        bind("m", "Toggle side menu", Global),
        bind("r", "Toggle refine search", Global),
        bind("/", "Focus search input", Global),
        bind("j / Down", "Next result", Results),
        bind("k / Up", "Previous result", Results),
        bind("p", "Load preview", Results),
        bind("t", "Edit tags", Results),
        bind("x", "Hide / show file", Results),
        bind("a", "Search by author", Results),
        bind("s", "Search by source", Results),
        bind("f", "Search by file path", Results),
        bind("1-9", "Search by n-th tag", Results),
        bind("Enter", "Search", SearchInput),
        bind("Esc", "Leave input", SearchInput),
        bind("Ctrl+u", "Clear input", SearchInput),
        bind(",", "Add typed tag", TagEditor),
        bind("Enter", "Add typed or highlighted tag", TagEditor),
        bind("Backspace", "Remove last tag when empty", TagEditor),
        bind("Left / Right", "Pick a tag", TagEditor),
        bind("Delete", "Remove picked tag", TagEditor),
        bind("Up / Down", "Highlight suggestion", TagEditor),
        bind("Esc", "Add typed tag and close", TagEditor),
        bind("j / k", "Move", RefineSearch),
        bind("Space", "Toggle source", RefineSearch),
        bind("Enter", "Search this source only", RefineSearch),
        bind("Esc / r", "Close", RefineSearch),
    ]
}

/// Bindings grouped by context, in display order.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, Vec<Keybinding>)> {
    let all = get_keybindings();
    KeyContext::all()
        .into_iter()
        .map(|context| {
            let bindings: Vec<Keybinding> =
                all.iter().filter(|b| b.context == context).cloned().collect();
            (context, bindings)
        })
        .filter(|(_, bindings)| !bindings.is_empty())
        .collect()
}
