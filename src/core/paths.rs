//! Node-path derivation. Paths are deterministic functions of the name
//! fields; the store itself enforces uniqueness per path.

pub const SERVICES_ROOT: &str = "/services";
pub const LISTEN_ROOT: &str = "/listen";

pub fn service_path(service: &str) -> String {
    format!("{}/{}", SERVICES_ROOT, service)
}

pub fn listen_path(service: &str, socket: &str) -> String {
    format!("{}/{}.{}", LISTEN_ROOT, service, socket)
}
