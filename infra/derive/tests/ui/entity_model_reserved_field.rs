use roster_derive::entity_model;

#[entity_model(class = PLANT)]
pub struct Plant {
    pub name: Option<String>,
    pub category: String,
}

fn main() {}
