//! Global UI state and the layout container's projection of it.
//!
//! The layout shell (header, search input, side menu, refine-search panel)
//! only sees [`LayoutProps`], built from [`GlobalState`] by
//! [`LayoutProps::from_state`]. Changes go back through [`LayoutAction`].

use crate::api::Source;
use crate::config::AppMode;

/// Which screen the shell is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    /// The search results page.
    #[default]
    Search,
    /// The key binding reference.
    Help,
}

impl Location {
    /// Route-style name, shown in the status bar.
    pub fn path(&self) -> &'static str {
        match self {
            Location::Search => "/search",
            Location::Help => "/help",
        }
    }

    /// Header text for the screen.
    pub fn title(&self) -> &'static str {
        match self {
            Location::Search => "Search",
            Location::Help => "Help",
        }
    }
}

/// Application-wide UI state.
#[derive(Debug, Clone, Default)]
pub struct GlobalState {
    /// True while any search is in flight.
    pub fetching: bool,
    /// Current screen.
    pub location: Location,
    /// Whether the side menu is open.
    pub is_side_menu_open: bool,
    /// Header text.
    pub header: String,
    /// Whether the search input is shown in the header.
    pub show_search_input: bool,
    /// Text of the search input.
    pub query: String,
    /// Crawler sources with their selection flags.
    pub sources: Vec<Source>,
    /// Whether the refine-search panel is open.
    pub is_refine_search_modal_open: bool,
    /// Backend edition.
    pub mode: AppMode,
}

impl GlobalState {
    /// Initial state for the search page.
    pub fn new(mode: AppMode) -> Self {
        Self {
            header: Location::Search.title().to_string(),
            show_search_input: true,
            mode,
            ..Self::default()
        }
    }
}

/// Actions the layout container can dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutAction {
    /// Open or close the side menu.
    ToggleSideMenu,
    /// Navigate to a screen.
    ChangeLocation(Location),
    /// Replace the search input text.
    SetQuery(String),
    /// Open or close the refine-search panel.
    ToggleRefineSearchModal,
    /// Flip the selection flag of a source.
    ToggleSourceSelected(String),
    /// Select exactly one source.
    SelectOnlySource(String),
    /// Replace the source list.
    SetSources(Vec<Source>),
    /// Replace the header text.
    SetHeader(String),
    /// Set the global fetching flag.
    SetFetching(bool),
}

/// Apply a layout action, producing the next state.
pub fn reduce(state: &GlobalState, action: &LayoutAction) -> GlobalState {
    let mut next = state.clone();
    match action {
        LayoutAction::ToggleSideMenu => next.is_side_menu_open = !state.is_side_menu_open,
        LayoutAction::ChangeLocation(location) => {
            next.location = *location;
            next.show_search_input = *location == Location::Search;
        }
        LayoutAction::SetQuery(query) => next.query = query.clone(),
        LayoutAction::ToggleRefineSearchModal => {
            next.is_refine_search_modal_open = !state.is_refine_search_modal_open
        }
        LayoutAction::ToggleSourceSelected(id) => {
            for source in next.sources.iter_mut().filter(|s| &s.id == id) {
                source.selected = !source.selected;
            }
        }
        LayoutAction::SelectOnlySource(id) => {
            for source in next.sources.iter_mut() {
                source.selected = &source.id == id;
            }
        }
        LayoutAction::SetSources(sources) => next.sources = sources.clone(),
        LayoutAction::SetHeader(header) => next.header = header.clone(),
        LayoutAction::SetFetching(fetching) => next.fetching = *fetching,
    }
    next
}

/// What the layout shell renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProps<'a> {
    /// Show the loading indicator.
    pub fetching: bool,
    /// Current route path.
    pub location: &'static str,
    /// Side menu open.
    pub is_side_menu_open: bool,
    /// Header text.
    pub header: &'a str,
    /// Whether to draw the search input.
    pub show_search_input: bool,
    /// Search input text.
    pub query: &'a str,
    /// Sources with selection flags.
    pub sources: &'a [Source],
    /// Refine-search panel open.
    pub is_refine_search_modal_open: bool,
    /// Backend edition label.
    pub mode: &'static str,
}

impl<'a> LayoutProps<'a> {
    /// Project the global state.
    pub fn from_state(state: &'a GlobalState) -> Self {
        Self {
            fetching: state.fetching,
            location: state.location.path(),
            is_side_menu_open: state.is_side_menu_open,
            header: &state.header,
            show_search_input: state.show_search_input,
            query: &state.query,
            sources: &state.sources,
            is_refine_search_modal_open: state.is_refine_search_modal_open,
            mode: state.mode.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_sources() -> GlobalState {
        GlobalState {
            sources: vec![Source::new("docs"), Source::new("mail"), Source::new("wiki")],
            ..GlobalState::new(AppMode::Ce)
        }
    }

    #[test]
    fn test_toggles() {
        let state = GlobalState::new(AppMode::Ce);
        let state = reduce(&state, &LayoutAction::ToggleSideMenu);
        assert!(state.is_side_menu_open);
        let state = reduce(&state, &LayoutAction::ToggleSideMenu);
        assert!(!state.is_side_menu_open);

        let state = reduce(&state, &LayoutAction::ToggleRefineSearchModal);
        assert!(state.is_refine_search_modal_open);
    }

    #[test]
    fn test_reduce_does_not_touch_previous_state() {
        let before = GlobalState::new(AppMode::Ce);
        let after = reduce(&before, &LayoutAction::SetQuery("hello".to_string()));
        assert_eq!(before.query, "");
        assert_eq!(after.query, "hello");
    }

    #[test]
    fn test_toggle_source_selected() {
        let state = reduce(&with_sources(), &LayoutAction::ToggleSourceSelected("mail".to_string()));
        let selected: Vec<bool> = state.sources.iter().map(|s| s.selected).collect();
        assert_eq!(selected, vec![true, false, true]);
    }

    #[test]
    fn test_select_only_source() {
        let state = reduce(&with_sources(), &LayoutAction::SelectOnlySource("wiki".to_string()));
        let selected: Vec<bool> = state.sources.iter().map(|s| s.selected).collect();
        assert_eq!(selected, vec![false, false, true]);
    }

    #[test]
    fn test_change_location_hides_search_input() {
        let state = reduce(
            &GlobalState::new(AppMode::Ce),
            &LayoutAction::ChangeLocation(Location::Help),
        );
        assert_eq!(state.location, Location::Help);
        assert!(!state.show_search_input);
    }

    #[test]
    fn test_props_projection() {
        let mut state = with_sources();
        state.query = "budget".to_string();
        state.fetching = true;
        state.mode = AppMode::Ee;

        let props = LayoutProps::from_state(&state);
        assert!(props.fetching);
        assert_eq!(props.location, "/search");
        assert_eq!(props.header, "Search");
        assert_eq!(props.query, "budget");
        assert_eq!(props.sources.len(), 3);
        assert_eq!(props.mode, "EE");
        assert!(props.show_search_input);
    }
}
