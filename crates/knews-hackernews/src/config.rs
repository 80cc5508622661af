use knews_config::{AppConfig, OverflowPolicy};
use knews_redux::{Overflow, StoreOptions};

/// Store tuning taken from the application config
pub fn store_options(config: &AppConfig) -> StoreOptions {
    let overflow = match config.store.overflow {
        OverflowPolicy::DropOldest => Overflow::DropOldest,
        OverflowPolicy::Suspend => Overflow::Suspend,
    };

    StoreOptions {
        capacity: config.store.buffer_capacity,
        overflow,
    }
}
