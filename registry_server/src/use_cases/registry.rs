use crate::domain::{IdStrategy, NewUser, User};

// In-memory, insertion-ordered user collection.
//
// Callers share one instance behind a mutex so id assignment and insertion
// happen as a single step.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
    id_strategy: IdStrategy,
    // Highest id ever handed out, including deleted users.
    highest_issued: u64,
}

impl UserRegistry {
    // Create an empty registry with the given id strategy.
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            users: Vec::new(),
            id_strategy,
            highest_issued: 0,
        }
    }

    // Create a registry pre-populated with the two sample users.
    pub fn with_sample_users(id_strategy: IdStrategy) -> Self {
        let mut registry = Self::new(id_strategy);
        registry.create(NewUser::new("John Doe", "john@example.com"));
        registry.create(NewUser::new("Jane Smith", "jane@example.com"));
        registry
    }

    // Current users in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    // Append a user and return the stored record.
    pub fn create(&mut self, new_user: NewUser) -> User {
        let id = self
            .id_strategy
            .next_id(self.users.len(), self.highest_issued);
        self.highest_issued = self.highest_issued.max(id);

        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
        };
        self.users.push(user.clone());
        user
    }

    // Remove every record carrying `id` and report how many were dropped.
    pub fn delete(&mut self, id: u64) -> usize {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        before - self.users.len()
    }
}
