pub mod book;
pub mod budget;
pub mod category;
pub mod goal;
pub mod reminder;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in book::definitions() {
        registry.register(entry);
    }
    for entry in transaction::definitions() {
        registry.register(entry);
    }
    for entry in budget::definitions() {
        registry.register(entry);
    }
    for entry in goal::definitions() {
        registry.register(entry);
    }
    for entry in reminder::definitions() {
        registry.register(entry);
    }
    for entry in category::definitions() {
        registry.register(entry);
    }
    for entry in report::definitions() {
        registry.register(entry);
    }
    for entry in system::definitions() {
        registry.register(entry);
    }
}
