// Error codes implementation
// Stable codes returned in the `errorCode` field of API error bodies

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_2001";
    pub const TOKEN_INVALID: &str = "AUTH_2002";
    pub const TOKEN_MISSING: &str = "AUTH_2003";
}

pub mod authorization {
    pub const ACCESS_DENIED: &str = "AUTHZ_3001";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RESOURCE_5001";
    pub const CONFLICT: &str = "RESOURCE_5002";
    pub const INVALID_TRANSITION: &str = "RESOURCE_5003";
}

pub mod database {
    pub const CONNECTION_FAILED: &str = "DB_4001";
    pub const QUERY_FAILED: &str = "DB_4002";
}

pub mod internal {
    pub const UNEXPECTED: &str = "INTERNAL_9001";
}
