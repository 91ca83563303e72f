pub mod deeplink;
pub mod notebooks;
pub mod paths;
pub mod rename;
pub mod selection;
pub mod session;
