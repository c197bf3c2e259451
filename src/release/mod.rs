pub mod dispatcher;

pub use dispatcher::ReleaseDispatcher;
