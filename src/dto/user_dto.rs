use crate::models::user::User;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub device_id: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            device_id: u.device_id,
            is_active: u.is_active,
        }
    }
}
