/// Contents of the results panel. Each render replaces the previous panel wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    /// Nothing typed yet, show the usage hint
    #[default]
    Placeholder,
    /// A translation is running
    Pending,
    Results(Vec<ResultCard>),
    /// A single error card
    Notice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceIcon {
    pub class: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Text(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub service: String,
    pub icon: ServiceIcon,
    pub body: CardBody,
    /// `source → target`
    pub lang_info: String,
    /// Text placed on the clipboard by the copy action
    pub copy_text: String,
    /// Text read by the speak action, absent for failed entries
    pub speak_text: Option<String>,
}
