use crate::env_or;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self {
            // bcrypt accepts 4..=31
            bcrypt_cost: env_or("BCRYPT_COST", 12u32).clamp(4, 31),
        }
    }
}
