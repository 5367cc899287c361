//! Tempero order server
//!
//! HTTP backend for a small restaurant: public menu and checkout, a kitchen
//! board for staff, receipt printing and sales reports.
//!
//! # Module layout
//!
//! ```text
//! order-server/src/
//! ├── core/       # config, state, server lifecycle
//! ├── auth/       # JWT session cookie, role gates
//! ├── api/        # HTTP routes and handlers
//! ├── services/   # router assembly, listener
//! ├── db/         # SQLite pool, migrations, repositories
//! ├── orders/     # pricing and order lifecycle
//! ├── reports/    # sales aggregation over order summaries
//! ├── printing/   # ESC/POS receipt rendering and sending
//! └── utils/      # logging, time, money, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod printing;
pub mod reports;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger
pub use utils::logger::init_logger_with_file;

// Security logging macro: auth events go to the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
  _____                                
 |_   _|__ _ __ ___  _ __   ___ _ __ ___  
   | |/ _ \ '_ ` _ \| '_ \ / _ \ '__/ _ \ 
   | |  __/ | | | | | |_) |  __/ | | (_) |
   |_|\___|_| |_| |_| .__/ \___|_|  \___/ 
                    |_|   order server
    "#
    );
}
