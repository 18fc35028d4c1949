// Sidebar menu model
// Defines the interaction modes, their order, labels and icons

use serde::Serialize;

/// Title shown in the browser tab
pub const PAGE_TITLE: &str = "Gemini AI";

/// Icon shown in the browser tab
pub const PAGE_ICON: &str = "🧠";

/// Heading of the sidebar menu
pub const MENU_TITLE: &str = "Gemini AI";

/// Icon next to the sidebar heading
pub const MENU_ICON: &str = "robot";

/// Interaction mode selected from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Multi-turn chat
    ChatBot,
    /// Caption an uploaded image
    ImageCaptioning,
    /// Get an embedding vector for some text
    EmbedText,
    /// One-shot question
    AskMeAnything,
}

impl Mode {
    /// All modes in sidebar order
    pub const ALL: [Mode; 4] = [
        Mode::ChatBot,
        Mode::ImageCaptioning,
        Mode::EmbedText,
        Mode::AskMeAnything,
    ];

    /// Label shown in the sidebar
    pub fn label(&self) -> &'static str {
        match self {
            Mode::ChatBot => "ChatBot",
            Mode::ImageCaptioning => "Image Captioning",
            Mode::EmbedText => "Embed text",
            Mode::AskMeAnything => "Ask me anything",
        }
    }

    /// Bootstrap icon name shown next to the label
    pub fn icon(&self) -> &'static str {
        match self {
            Mode::ChatBot => "chat-dots-fill",
            Mode::ImageCaptioning => "image-fill",
            Mode::EmbedText => "textarea-t",
            Mode::AskMeAnything => "patch-question-fill",
        }
    }

    /// Heading of the page body
    pub fn title(&self) -> &'static str {
        match self {
            Mode::ChatBot => "🤖 ChatBot",
            Mode::ImageCaptioning => "📷 Snap Narrate",
            Mode::EmbedText => "🔡 Embed Text",
            Mode::AskMeAnything => "❓ Ask me a question",
        }
    }

    /// Placeholder of the mode's input widget
    pub fn placeholder(&self) -> &'static str {
        match self {
            Mode::ChatBot => "Ask Gemini...",
            Mode::ImageCaptioning => "Upload an image...",
            Mode::EmbedText => "Enter the text to get embeddings",
            Mode::AskMeAnything => "Ask me anything...",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::ALL[0]
    }
}

/// One entry of the sidebar
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    /// Mode selected by this entry
    pub mode: Mode,
    /// Sidebar label
    pub label: &'static str,
    /// Icon name
    pub icon: &'static str,
    /// Page body heading
    pub title: &'static str,
    /// Input placeholder
    pub placeholder: &'static str,
}

impl From<Mode> for MenuItem {
    fn from(mode: Mode) -> Self {
        Self {
            mode,
            label: mode.label(),
            icon: mode.icon(),
            title: mode.title(),
            placeholder: mode.placeholder(),
        }
    }
}

/// Everything the page needs to draw its sidebar
#[derive(Debug, Clone, Serialize)]
pub struct Menu {
    /// Browser tab title
    pub page_title: &'static str,
    /// Browser tab icon
    pub page_icon: &'static str,
    /// Sidebar heading
    pub menu_title: &'static str,
    /// Sidebar heading icon
    pub menu_icon: &'static str,
    /// Entries in display order
    pub items: Vec<MenuItem>,
    /// Index of the entry selected on first load
    pub default_index: usize,
}

impl Default for Menu {
    fn default() -> Self {
        let default_mode = Mode::default();
        Self {
            page_title: PAGE_TITLE,
            page_icon: PAGE_ICON,
            menu_title: MENU_TITLE,
            menu_icon: MENU_ICON,
            items: Mode::ALL.into_iter().map(MenuItem::from).collect(),
            default_index: Mode::ALL
                .iter()
                .position(|m| *m == default_mode)
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_order_and_default() {
        let menu = Menu::default();
        let labels: Vec<_> = menu.items.iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec!["ChatBot", "Image Captioning", "Embed text", "Ask me anything"]
        );
        assert_eq!(menu.default_index, 0);
        assert_eq!(menu.items[menu.default_index].mode, Mode::ChatBot);
        assert_eq!(menu.menu_icon, "robot");
    }

    #[test]
    fn test_menu_serializes_mode_keys() {
        let value = serde_json::to_value(Menu::default()).unwrap();
        assert_eq!(value["items"][1]["mode"], "image-captioning");
        assert_eq!(value["items"][1]["title"], "📷 Snap Narrate");
        assert_eq!(value["page_title"], "Gemini AI");
    }
}
