//! Tab bar
//!
//! The shell has four fixed tabs. Each renders as an icon tinted by focus
//! plus a label styled by focus.

pub const FOCUSED_TINT: &str = "#fe8c00";
pub const UNFOCUSED_TINT: &str = "#5d5f6d";
pub const FOCUSED_LABEL_CLASS: &str = "text-primary";
pub const UNFOCUSED_LABEL_CLASS: &str = "text-gray-200";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Search,
    Cart,
    Profile,
}

impl Tab {
    /// Tabs in bar order
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Search, Tab::Cart, Tab::Profile];

    /// Route name of the tab screen
    pub fn route(self) -> &'static str {
        match self {
            Tab::Home => "index",
            Tab::Search => "search",
            Tab::Cart => "cart",
            Tab::Profile => "profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Cart => "Cart",
            Tab::Profile => "Profile",
        }
    }

    /// Icon asset name
    pub fn icon(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Search => "search",
            Tab::Cart => "bag",
            Tab::Profile => "user",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.route() == route)
    }
}

/// Render data for one tab bar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBarItem {
    pub tab: Tab,
    pub route: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub tint: &'static str,
    pub label_class: &'static str,
    pub focused: bool,
}

impl TabBarItem {
    pub fn new(tab: Tab, focused: bool) -> Self {
        Self {
            tab,
            route: tab.route(),
            title: tab.title(),
            icon: tab.icon(),
            tint: if focused { FOCUSED_TINT } else { UNFOCUSED_TINT },
            label_class: if focused {
                FOCUSED_LABEL_CLASS
            } else {
                UNFOCUSED_LABEL_CLASS
            },
            focused,
        }
    }
}

/// The tabbed shell with one active tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabShell {
    active: Tab,
}

impl TabShell {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    /// Bar entries in order, exactly one focused
    pub fn items(&self) -> Vec<TabBarItem> {
        Tab::ALL
            .into_iter()
            .map(|tab| TabBarItem::new(tab, tab == self.active))
            .collect()
    }
}

impl Default for TabShell {
    fn default() -> Self {
        Self::new(Tab::Home)
    }
}
