pub mod config;
pub mod entries;
pub mod month;
pub mod system;
pub mod view;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in view::definitions()
        .into_iter()
        .chain(entries::definitions())
        .chain(month::definitions())
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
