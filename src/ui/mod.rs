/// Popup UI: Yew components and the bridge to the extension APIs
pub mod bridge;
pub mod components;
pub mod popup;
