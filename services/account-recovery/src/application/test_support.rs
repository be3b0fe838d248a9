use async_trait::async_trait;
use keysmith_errors::AppResult;
use keysmith_ports::{EventContext, EventDispatcher};
use mockall::mock;
use secrecy::Secret;

use crate::domain::token::TokenHashingParams;

mock! {
    pub Dispatcher {}

    #[async_trait]
    impl EventDispatcher for Dispatcher {
        async fn fire_event(&self, name: &str, context: &EventContext) -> AppResult<()>;
    }
}

pub fn cheap_params() -> TokenHashingParams {
    TokenHashingParams::new(1024, 1, 1)
}

pub fn secret(value: &str) -> Secret<String> {
    Secret::new(value.to_string())
}
