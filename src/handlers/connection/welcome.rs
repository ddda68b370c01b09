//! Registration welcome burst.

use crate::handlers::{helpers::server_reply, Context};

/// Numerics and texts of the burst sent on registration.
const WELCOME_BURST: [(&str, &str); 4] = [
    ("001", "You"),
    ("002", "are"),
    ("003", "now"),
    ("004", "connected"),
];

/// Send RPL_WELCOME through RPL_MYINFO to the sender only.
pub fn send_welcome_burst(ctx: &Context<'_>, nick: &str) {
    for (code, text) in WELCOME_BURST {
        ctx.send(&server_reply(&ctx.server.name, code, nick, text));
    }
}
