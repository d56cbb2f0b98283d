//! One module per operation; each returns the process exit code

pub mod close;
pub mod enter;
pub mod status;
pub mod verify;

use lockgroup_access::peripherals::CommandCamera;
use lockgroup_access::{FileAuditLog, LockGroupResolver, VerificationEngine};
use lockgroup_core::config::AuditConfig;
use lockgroup_core::LockgroupConfig;
use lockgroup_registry::{FileRegistryLoader, StaticRegistryLoader};

/// Engine over the configured registry files, audit log and camera
pub(crate) fn engine(
    config: &LockgroupConfig,
) -> VerificationEngine<FileRegistryLoader, FileAuditLog> {
    let engine = VerificationEngine::new(
        FileRegistryLoader::from_config(&config.registry),
        FileAuditLog::from_config(&config.audit),
    );
    match CommandCamera::from_config(&config.evidence) {
        Some(camera) => engine.with_camera(Box::new(camera)),
        None => engine,
    }
}

/// Engine that resolves nothing but still audits every attempt
pub(crate) fn denying_engine(
    audit: &AuditConfig,
) -> VerificationEngine<StaticRegistryLoader, FileAuditLog> {
    VerificationEngine::new(
        StaticRegistryLoader::default(),
        FileAuditLog::from_config(audit),
    )
}

pub(crate) fn resolver(config: &LockgroupConfig) -> LockGroupResolver<FileRegistryLoader> {
    LockGroupResolver::new(FileRegistryLoader::from_config(&config.registry))
}
