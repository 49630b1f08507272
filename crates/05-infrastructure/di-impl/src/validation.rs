//! 注册校验规则
//!
//! 运行时管理器与覆盖管理器共享的校验逻辑

use di_abstractions::{is_protected, ServiceInstance, TypeDescriptor};
use sdk_common::{
    CapabilityKey, CapabilityKind, DependencyError, DependencyResult, RegistrationViolation,
};

const NULL_CAPABILITY: &str = "<null>";

/// 校验能力标识本身
fn validate_capability(capability: &CapabilityKey) -> DependencyResult<()> {
    if is_protected(capability) {
        return Err(DependencyError::invalid_registration(
            capability.name(),
            RegistrationViolation::ProtectedCapability,
        ));
    }

    if !capability.is_contract() {
        return Err(DependencyError::invalid_registration(
            capability.name(),
            RegistrationViolation::NotAContract,
        ));
    }

    Ok(())
}

/// 校验实例注册
pub(crate) fn validate_registration(
    capability: Option<&CapabilityKey>,
    instance: Option<ServiceInstance>,
) -> DependencyResult<(CapabilityKey, ServiceInstance)> {
    let capability = capability.ok_or_else(|| {
        DependencyError::invalid_registration(NULL_CAPABILITY, RegistrationViolation::NullCapability)
    })?;
    let instance = instance.ok_or_else(|| {
        DependencyError::invalid_registration(capability.name(), RegistrationViolation::NullInstance)
    })?;

    validate_capability(capability)?;

    if !instance.satisfies(capability) {
        return Err(DependencyError::invalid_registration(
            capability.name(),
            RegistrationViolation::CapabilityMismatch,
        ));
    }

    Ok((capability.clone(), instance))
}

/// 校验类型注册
pub(crate) fn validate_type_registration<'a>(
    capability: Option<&'a CapabilityKey>,
    descriptor: Option<&'a TypeDescriptor>,
) -> DependencyResult<(&'a CapabilityKey, &'a TypeDescriptor)> {
    let capability = capability.ok_or_else(|| {
        DependencyError::invalid_registration(NULL_CAPABILITY, RegistrationViolation::NullCapability)
    })?;
    let descriptor = descriptor.ok_or_else(|| {
        DependencyError::invalid_registration(capability.name(), RegistrationViolation::NullInstance)
    })?;

    validate_capability(capability)?;

    if descriptor.kind() != CapabilityKind::Concrete {
        return Err(DependencyError::invalid_registration(
            capability.name(),
            RegistrationViolation::NotConcrete,
        ));
    }

    if !descriptor.declares(capability) {
        return Err(DependencyError::invalid_registration(
            capability.name(),
            RegistrationViolation::CapabilityMismatch,
        ));
    }

    Ok((capability, descriptor))
}
