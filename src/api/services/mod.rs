mod links;
mod redirect;
mod token;

pub use links::{LinksService, PageQuery, ShortenRequest};
pub use redirect::RedirectService;
pub use token::{CsrfToken, TokenService};
