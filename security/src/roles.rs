// security/src/roles.rs
use std::collections::HashMap;

use models::hostel::Role;

pub const SUPERUSER: &str = "superuser";
pub const MANAGE_USERS: &str = "manage_users";
pub const MANAGE_ROOMS: &str = "manage_rooms";
pub const MANAGE_RESIDENTS: &str = "manage_residents";
pub const MANAGE_BILLING: &str = "manage_billing";
pub const MANAGE_MAINTENANCE: &str = "manage_maintenance";
pub const VIEW_REPORTS: &str = "view_reports";

#[derive(Debug, Clone)]
pub struct RolesConfig {
    roles: HashMap<Role, Vec<String>>,
}

impl Default for RolesConfig {
    fn default() -> Self {
        let staff = [MANAGE_ROOMS, MANAGE_RESIDENTS, MANAGE_BILLING, MANAGE_MAINTENANCE, VIEW_REPORTS]
            .iter()
            .map(|p| p.to_string())
            .collect();
        let mut roles = HashMap::new();
        roles.insert(Role::Admin, vec![SUPERUSER.to_string()]);
        roles.insert(Role::Administrator, vec![SUPERUSER.to_string()]);
        roles.insert(Role::Staff, staff);
        Self { roles }
    }
}

impl RolesConfig {
    pub fn permissions(&self, role: Role) -> &[String] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_permission(&self, role: Role, permission_name: &str) -> bool {
        self.permissions(role)
            .iter()
            .any(|p| p == permission_name || p == SUPERUSER)
    }
}
