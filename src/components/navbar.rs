use askama::Template;

/// A link in the navigation bar. `icon` is a feather icon name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub icon: Option<String>,
}

impl NavItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarConfig {
    pub logo_url: String,
    pub logo_alt: String,
    pub items: Vec<NavItem>,
    pub cta: NavItem,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            logo_url: String::from("/static/images/logo.svg"),
            logo_alt: String::from("Secret Shopper Express Logo"),
            items: vec![
                NavItem::new("Home", "/").with_icon("home"),
                NavItem::new("About", "#about").with_icon("info"),
                NavItem::new("Earnings", "#earnings").with_icon("dollar-sign"),
                NavItem::new("Assignments", "#assignments").with_icon("shopping-bag"),
                NavItem::new("Contact", "/contact.html").with_icon("mail"),
            ],
            cta: NavItem::new("Apply Now", "#apply"),
        }
    }
}

/// The navigation bar: its own `<style>` block plus markup, scoped under
/// the `custom-navbar` element. The mobile toggle is a checkbox, so the
/// menu opens without any script.
#[derive(Template)]
#[template(path = "components/navbar.html")]
pub struct Navbar<'a> {
    pub config: &'a NavbarConfig,
    pub menu_open: bool,
}

impl<'a> Navbar<'a> {
    pub fn new(config: &'a NavbarConfig) -> Self {
        Self::with_menu(config, &MobileMenu::default())
    }

    /// Renders with the toggle reflecting `menu`.
    pub fn with_menu(config: &'a NavbarConfig, menu: &MobileMenu) -> Self {
        Self {
            config,
            menu_open: menu.display() == MenuDisplay::Flex,
        }
    }
}

/// `display` of the link list, driven by the mobile toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuDisplay {
    /// No inline style; the stylesheet decides.
    #[default]
    Unset,
    Flex,
    Hidden,
}

impl MenuDisplay {
    pub fn css_value(&self) -> &'static str {
        match self {
            MenuDisplay::Unset => "",
            MenuDisplay::Flex => "flex",
            MenuDisplay::Hidden => "none",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    display: MenuDisplay,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> MenuDisplay {
        self.display
    }

    /// Handles a click on the toggle: anything other than `flex` becomes
    /// `flex`, `flex` becomes `none`.
    pub fn toggle(&mut self) -> MenuDisplay {
        self.display = match self.display {
            MenuDisplay::Flex => MenuDisplay::Hidden,
            MenuDisplay::Unset | MenuDisplay::Hidden => MenuDisplay::Flex,
        };
        self.display
    }
}
