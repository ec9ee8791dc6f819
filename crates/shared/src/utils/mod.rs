mod continuation_token;
mod logs;
mod page_url;
mod parse_datetime;
mod shutdown;

pub use self::continuation_token::{ContinuationToken, TokenError};
pub use self::logs::Logger;
pub use self::page_url::{first_query_values, next_page_url};
pub use self::parse_datetime::parse_datetime;
pub use self::shutdown::shutdown_signal;
