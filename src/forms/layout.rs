use serde::Deserialize;

/// Posted by the collapse button of the navigation rail.
#[derive(Debug, Default, Deserialize)]
pub struct SidebarForm {
    /// Page to return to after toggling.
    #[serde(default)]
    pub next: String,
}
