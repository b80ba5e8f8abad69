//! Ports (trait seams between the core and its adapters)

pub mod change_source;
pub mod cursor_store;
pub mod object_store;
pub mod tenant_directory;

pub use change_source::ChangeSource;
pub use cursor_store::CursorStore;
pub use object_store::ObjectStore;
pub use tenant_directory::TenantDirectory;
