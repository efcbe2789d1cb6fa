/// Use cases module containing application business logic orchestration
mod compare_inventories;
mod generate_inventory;

pub use compare_inventories::CompareInventoriesUseCase;
pub use generate_inventory::GenerateInventoryUseCase;
