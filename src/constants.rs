// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DATABASE_FILE: &str = "expenses.db";
pub const API_BASE_PATH: &str = "/api/expenses";

// Client configuration
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/expenses";
pub const DEFAULT_STORAGE_PATH: &str = ".expense-tracker";
pub const STORAGE_KEY: &str = "expenses";

// Expense defaults and display
pub const PLACEHOLDER_DESCRIPTION: &str = "—";
pub const ALL_CATEGORIES: &str = "All";
pub const CURRENCY_SYMBOL: &str = "₹";

// Validation limits
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

// Error messages
pub const ERR_DATABASE_OPERATION: &str = "Database operation failed";
pub const ERR_EXPENSE_NOT_FOUND: &str = "Expense not found";
