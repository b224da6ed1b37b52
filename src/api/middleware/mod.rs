mod csrf;

pub use csrf::CsrfGuard;
