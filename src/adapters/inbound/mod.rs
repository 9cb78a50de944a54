mod update_server;

pub use update_server::UpdateServer;

// Re-export for external use (e.g., integration tests)
pub use update_server::{
    build_router, handle_update, parse_update_path, RequestError, RouteError, UpdatePath,
    UpdateState, UPDATE_PREFIX,
};
