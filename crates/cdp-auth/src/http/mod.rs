/*
[INPUT]:  Client options and outgoing reqwest requests
[OUTPUT]: Authentication headers attached to requests
[POS]:    HTTP layer - glue between token builders and the HTTP client
[UPDATE]: When adding header types or request inspection rules
*/

pub mod authenticator;
pub mod client;
pub mod headers;

pub use authenticator::RequestAuthenticator;
pub use client::{ClientOptions, DEFAULT_BASE_PATH};
pub use headers::{
    AuthHeaders,
    CORRELATION_CONTEXT_HEADER,
    WALLET_AUTH_HEADER,
    correlation_context,
    get_auth_headers,
    get_websocket_auth_headers,
    requires_wallet_auth,
};
