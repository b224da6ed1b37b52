use std::fmt;

#[derive(Debug, Clone)]
pub enum LinkletError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    DuplicateCode(String),
    CollisionExhausted(String),
    Validation(String),
    NotFound(String),
}

impl LinkletError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkletError::DatabaseConfig(_) => "E001",
            LinkletError::DatabaseConnection(_) => "E002",
            LinkletError::DatabaseOperation(_) => "E003",
            LinkletError::DuplicateCode(_) => "E004",
            LinkletError::CollisionExhausted(_) => "E005",
            LinkletError::Validation(_) => "E006",
            LinkletError::NotFound(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkletError::DatabaseConfig(_) => "Database Configuration Error",
            LinkletError::DatabaseConnection(_) => "Database Connection Error",
            LinkletError::DatabaseOperation(_) => "Database Operation Error",
            LinkletError::DuplicateCode(_) => "Duplicate Short Code",
            LinkletError::CollisionExhausted(_) => "Code Generation Exhausted",
            LinkletError::Validation(_) => "Validation Error",
            LinkletError::NotFound(_) => "Resource Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkletError::DatabaseConfig(msg) => msg,
            LinkletError::DatabaseConnection(msg) => msg,
            LinkletError::DatabaseOperation(msg) => msg,
            LinkletError::DuplicateCode(msg) => msg,
            LinkletError::CollisionExhausted(msg) => msg,
            LinkletError::Validation(msg) => msg,
            LinkletError::NotFound(msg) => msg,
        }
    }

    /// HTTP 状态码映射（用于 API 边界）
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            LinkletError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkletError::DuplicateCode(_) => StatusCode::CONFLICT,
            LinkletError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkletError::CollisionExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            LinkletError::DatabaseConfig(_)
            | LinkletError::DatabaseConnection(_)
            | LinkletError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for LinkletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for LinkletError {}

// 便捷的构造函数
impl LinkletError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkletError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkletError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkletError::DatabaseOperation(msg.into())
    }

    pub fn duplicate_code<T: Into<String>>(msg: T) -> Self {
        LinkletError::DuplicateCode(msg.into())
    }

    pub fn collision_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkletError::CollisionExhausted(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkletError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkletError::NotFound(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkletError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突是创建流程的正常分支，必须与其余数据库错误可区分
        if matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ) {
            return LinkletError::DuplicateCode(err.to_string());
        }
        LinkletError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkletError>;
