//! Message processing
//!
//! Runs a message through the TEA update function, follows up chained
//! messages and hands every resulting action to the action dispatcher.

use sdash_api::StorageApi;

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<A>(state: &mut AppState, message: Message, ctx: &ActionContext<A>)
where
    A: StorageApi + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, ctx);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
