//! Profile `demo`: a `NamedThing` rooted hierarchy with nested organisms and a polymorphic
//! `Container`. Discriminators carry the `pydanticgen-demo:` prefix.

use crate::entity::{Entity, Named, Tagged};
use crate::entity_model;
use crate::error::{ModelError, ModelErrorExt};
use crate::schema::{ClassDecl, DISCRIMINATOR, SchemaProfile};
use crate::validate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod decl {
    use crate::schema::{ClassDecl, FieldDecl, FieldShape};

    const ID: FieldDecl = FieldDecl { name: "id", shape: FieldShape::Text };
    const NAME: FieldDecl = FieldDecl { name: "name", shape: FieldShape::Text };

    pub const NAMED_THING: ClassDecl = ClassDecl {
        name: "NamedThing",
        description: Some("Anything with a name and an ID"),
        is_a: None,
        category: Some("pydanticgen-demo:NamedThing"),
        fields: &[ID, NAME],
    };

    pub const PERSON: ClassDecl = ClassDecl {
        name: "Person",
        description: Some("A person"),
        is_a: Some(&NAMED_THING),
        category: Some("pydanticgen-demo:Person"),
        fields: &[],
    };

    pub const ONTOLOGIST: ClassDecl = ClassDecl {
        name: "Ontologist",
        description: Some("A person who builds ontologies"),
        is_a: Some(&PERSON),
        category: Some("pydanticgen-demo:Ontologist"),
        fields: &[FieldDecl { name: "favorite_animals", shape: FieldShape::EntityMap(&ANIMAL) }],
    };

    pub const PROGRAMMER: ClassDecl = ClassDecl {
        name: "Programmer",
        description: Some("A person who used to search stackoverflow a lot"),
        is_a: Some(&PERSON),
        category: Some("pydanticgen-demo:Programmer"),
        fields: &[FieldDecl { name: "favorite_plants", shape: FieldShape::TextList }],
    };

    pub const CHEF: ClassDecl = ClassDecl {
        name: "Chef",
        description: Some("A person who cooks"),
        is_a: Some(&PERSON),
        category: Some("pydanticgen-demo:Chef"),
        fields: &[
            FieldDecl { name: "favorite_animals", shape: FieldShape::EntityList(&ANIMAL) },
            FieldDecl { name: "favorite_plants", shape: FieldShape::EntityList(&PLANT) },
            FieldDecl { name: "favorite_fungi", shape: FieldShape::EntityList(&FUNGI) },
        ],
    };

    pub const ANIMAL: ClassDecl = ClassDecl {
        name: "Animal",
        description: Some("A living thing that is not a plant"),
        is_a: None,
        category: Some("pydanticgen-demo:Animal"),
        fields: &[ID, NAME],
    };

    pub const PLANT: ClassDecl = ClassDecl {
        name: "Plant",
        description: Some("A living thing that is not an animal"),
        is_a: None,
        category: Some("pydanticgen-demo:Plant"),
        fields: &[ID, NAME],
    };

    pub const FUNGI: ClassDecl = ClassDecl {
        name: "Fungi",
        description: Some("A living thing that is not an animal or a plant"),
        is_a: None,
        category: Some("pydanticgen-demo:Fungi"),
        fields: &[ID, NAME],
    };

    /// Members of the `Person` union held by [`CONTAINER`].
    pub const PERSON_MEMBERS: &[&ClassDecl] = &[&PERSON, &ONTOLOGIST, &PROGRAMMER, &CHEF];

    pub const CONTAINER: ClassDecl = ClassDecl {
        name: "Container",
        description: Some("A top level wrapper around a Person list"),
        is_a: None,
        category: None,
        fields: &[FieldDecl {
            name: "people",
            shape: FieldShape::UnionList { root: &PERSON, members: PERSON_MEMBERS },
        }],
    };
}

pub const PROFILE: SchemaProfile = SchemaProfile {
    name: "demo",
    classes: &[
        &decl::NAMED_THING,
        &decl::PERSON,
        &decl::ONTOLOGIST,
        &decl::PROGRAMMER,
        &decl::CHEF,
        &decl::CONTAINER,
        &decl::ANIMAL,
        &decl::PLANT,
        &decl::FUNGI,
    ],
};

/// Anything with a name and an ID.
#[entity_model(class = decl::NAMED_THING)]
pub struct NamedThing {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A person.
#[entity_model(class = decl::PERSON)]
pub struct Person {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A person who builds ontologies. Animals are keyed by a caller-chosen name.
#[entity_model(class = decl::ONTOLOGIST)]
pub struct Ontologist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub favorite_animals: BTreeMap<String, Animal>,
}

/// A person who used to search stackoverflow a lot.
#[entity_model(class = decl::PROGRAMMER)]
pub struct Programmer {
    pub id: Option<String>,
    pub name: Option<String>,
    pub favorite_plants: Vec<String>,
}

/// A person who cooks.
#[entity_model(class = decl::CHEF)]
pub struct Chef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub favorite_animals: Vec<Animal>,
    pub favorite_plants: Vec<Plant>,
    pub favorite_fungi: Vec<Fungi>,
}

/// A living thing that is not a plant.
#[entity_model(class = decl::ANIMAL)]
pub struct Animal {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A living thing that is not an animal.
#[entity_model(class = decl::PLANT)]
pub struct Plant {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A living thing that is not an animal or a plant.
#[entity_model(class = decl::FUNGI)]
pub struct Fungi {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A top level wrapper around a Person list.
#[entity_model(class = decl::CONTAINER, untagged)]
pub struct Container {
    pub people: Vec<PersonKind>,
}

impl Container {
    /// Appends a person of any concrete class.
    pub fn push_person(&mut self, person: impl Into<PersonKind>) {
        self.people.push(person.into());
    }

    /// Number of people per discriminator literal.
    #[must_use]
    pub fn count_by_category(&self) -> BTreeMap<&'static str, usize> {
        self.people.iter().fold(BTreeMap::new(), |mut counts, person| {
            *counts.entry(person.category()).or_default() += 1;
            counts
        })
    }
}

/// One element of `Container.people`: the concrete class is recovered from `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PersonKind {
    Person(Person),
    Ontologist(Ontologist),
    Programmer(Programmer),
    Chef(Chef),
}

impl PersonKind {
    /// Root class of the union.
    pub const ROOT: &'static ClassDecl = &decl::PERSON;

    /// Discriminator literals of every member, in declaration order.
    pub const CATEGORIES: &'static [&'static str] =
        &[Person::CATEGORY, Ontologist::CATEGORY, Programmer::CATEGORY, Chef::CATEGORY];

    /// Builds a member from a raw value, dispatching on its discriminator.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        let path = Self::ROOT.name;
        let (class, fields) =
            validate::resolve_member(Self::ROOT, decl::PERSON_MEMBERS, &value, path)?;
        validate::check_entity(class, fields, path)?;

        let value = match value {
            Value::Object(fields) => Value::Object(validate::normalize(fields)),
            other => other,
        };
        serde_json::from_value::<Self>(value).context(path)
    }

    /// The concrete class of this member.
    #[must_use]
    pub const fn class(&self) -> &'static ClassDecl {
        match self {
            Self::Person(_) => Person::CLASS,
            Self::Ontologist(_) => Ontologist::CLASS,
            Self::Programmer(_) => Programmer::CLASS,
            Self::Chef(_) => Chef::CLASS,
        }
    }

    fn as_named(&self) -> &dyn Named {
        match self {
            Self::Person(person) => person,
            Self::Ontologist(ontologist) => ontologist,
            Self::Programmer(programmer) => programmer,
            Self::Chef(chef) => chef,
        }
    }
}

impl Named for PersonKind {
    fn id(&self) -> Option<&str> {
        self.as_named().id()
    }

    fn name(&self) -> Option<&str> {
        self.as_named().name()
    }

    fn category(&self) -> &'static str {
        self.as_named().category()
    }
}

impl<'de> Deserialize<'de> for PersonKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let category = match value.get(DISCRIMINATOR) {
            None | Some(Value::Null) => {
                return Err(<D::Error as de::Error>::missing_field(DISCRIMINATOR));
            },
            Some(Value::String(category)) => category.clone(),
            Some(other) => {
                let found = de::Unexpected::Other(validate::ValueKind::of(other).into());
                return Err(<D::Error as de::Error>::invalid_type(found, &"a string"));
            },
        };

        let person = match category.as_str() {
            c if c == Person::CATEGORY => serde_json::from_value(value).map(Self::Person),
            c if c == Ontologist::CATEGORY => serde_json::from_value(value).map(Self::Ontologist),
            c if c == Programmer::CATEGORY => serde_json::from_value(value).map(Self::Programmer),
            c if c == Chef::CATEGORY => serde_json::from_value(value).map(Self::Chef),
            other => return Err(de::Error::unknown_variant(other, Self::CATEGORIES)),
        };
        person.map_err(de::Error::custom)
    }
}

impl From<Person> for PersonKind {
    fn from(value: Person) -> Self {
        Self::Person(value)
    }
}

impl From<Ontologist> for PersonKind {
    fn from(value: Ontologist) -> Self {
        Self::Ontologist(value)
    }
}

impl From<Programmer> for PersonKind {
    fn from(value: Programmer) -> Self {
        Self::Programmer(value)
    }
}

impl From<Chef> for PersonKind {
    fn from(value: Chef) -> Self {
        Self::Chef(value)
    }
}

impl From<PersonKind> for Person {
    fn from(value: PersonKind) -> Self {
        match value {
            PersonKind::Person(person) => person,
            PersonKind::Ontologist(ontologist) => ontologist.into(),
            PersonKind::Programmer(programmer) => programmer.into(),
            PersonKind::Chef(chef) => chef.into(),
        }
    }
}

upcast!(
    Person => NamedThing,
    Ontologist => Person,
    Programmer => Person,
    Chef => Person,
);
canonicalizer!(NamedThing, Person, Ontologist, Programmer, Chef, Container, Animal, Plant, Fungi);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn container_helpers() {
        let mut container = Container::default();
        container.push_person(Chef::builder().name("Remy").build());
        container.push_person(Programmer::builder().name("Ada").build());
        container.push_person(Chef::default());

        let counts = container.count_by_category();
        assert_eq!(counts.get(Chef::CATEGORY), Some(&2));
        assert_eq!(counts.get(Programmer::CATEGORY), Some(&1));
        assert_eq!(container.people[1].name(), Some("Ada"));
        assert_eq!(container.people[0].class().name, "Chef");
    }

    #[test]
    fn person_kind_from_value_dispatches_and_reports_root_path() {
        let chef = PersonKind::from_value(json!({
            "category": "pydanticgen-demo:Chef",
            "favorite_plants": [{ "name": "basil" }],
        }));
        assert!(matches!(chef, Ok(PersonKind::Chef(ref c)) if c.favorite_plants.len() == 1));

        let err = PersonKind::from_value(json!({ "name": "x" })).unwrap_err();
        assert!(matches!(err, ModelError::MissingDiscriminator { .. }));
        assert_eq!(err.field(), Some("Person"));
    }

    #[test]
    fn serde_rejects_non_text_category_as_wrong_type() {
        let err = serde_json::from_value::<Container>(json!({ "people": [{ "category": 7 }] }))
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid type"), "{err}");
        assert!(!err.contains("missing field"), "{err}");

        let err = serde_json::from_value::<Container>(json!({ "people": [{ "name": "x" }] }))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing field `category`"), "{err}");
    }

    #[test]
    fn upcast_keeps_identity_and_changes_category() {
        let chef =
            Chef::builder().id("7").name("Remy").favorite_fungi(vec![Fungi::default()]).build();
        let person = Person::from(PersonKind::from(chef));

        assert_eq!(person.id.as_deref(), Some("7"));
        assert_eq!(person.category(), Person::CATEGORY);
        assert_eq!(NamedThing::from(person).category(), "pydanticgen-demo:NamedThing");
    }
}
