pub mod chat_loop;
pub mod layout;
pub mod markdown;
pub mod panels;
pub mod renderer;
pub mod sidebar;
pub mod theme;
pub mod transcript;
