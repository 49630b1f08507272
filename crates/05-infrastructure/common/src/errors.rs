//! 错误类型定义

use thiserror::Error;

/// 装箱的底层错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError { source: BoxError },
}

/// 注册规则冲突类型
///
/// 对应一次注册被拒绝的具体原因
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationViolation {
    #[error("能力标识为空")]
    NullCapability,

    #[error("服务实例为空")]
    NullInstance,

    #[error("能力属于定位器内部保护能力")]
    ProtectedCapability,

    #[error("能力标识不是契约类型")]
    NotAContract,

    #[error("实例未实现该能力")]
    CapabilityMismatch,

    #[error("类型描述符不是具体类型")]
    NotConcrete,
}

/// 服务定位错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("无法解析能力: {capability}")]
    Resolution { capability: String },

    #[error("无效注册: {capability}, 原因: {violation}")]
    InvalidRegistration {
        capability: String,
        violation: RegistrationViolation,
    },

    #[error("实例创建失败: {type_name}, 原因: {reason}")]
    Instantiation {
        type_name: String,
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("服务定位器已释放")]
    LocatorReleased,
}

impl DependencyError {
    /// 创建解析失败错误
    pub fn resolution(capability: impl Into<String>) -> Self {
        Self::Resolution {
            capability: capability.into(),
        }
    }

    /// 创建无效注册错误
    pub fn invalid_registration(
        capability: impl Into<String>,
        violation: RegistrationViolation,
    ) -> Self {
        Self::InvalidRegistration {
            capability: capability.into(),
            violation,
        }
    }

    /// 创建实例化错误
    pub fn instantiation(
        type_name: impl Into<String>,
        reason: impl Into<String>,
        source: Option<BoxError>,
    ) -> Self {
        Self::Instantiation {
            type_name: type_name.into(),
            reason: reason.into(),
            source,
        }
    }

    /// 若为无效注册错误，返回冲突类型
    pub fn violation(&self) -> Option<RegistrationViolation> {
        match self {
            Self::InvalidRegistration { violation, .. } => Some(*violation),
            _ => None,
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_instantiation_preserves_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = DependencyError::instantiation("Foo", "构造函数失败", Some(Box::new(inner)));

        let source = err.source().expect("source should be kept");
        assert_eq!(source.to_string(), "boom");
        assert!(err.to_string().contains("Foo"));
    }

    #[test]
    fn test_violation_accessor() {
        let err = DependencyError::invalid_registration(
            "dyn Foo",
            RegistrationViolation::ProtectedCapability,
        );
        assert_eq!(err.violation(), Some(RegistrationViolation::ProtectedCapability));
        assert_eq!(DependencyError::resolution("dyn Foo").violation(), None);
    }
}
