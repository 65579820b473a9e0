//! Profile `basic`: a `Person` root with two subclasses holding plain text lists.
//! Discriminators are bare class names.

use crate::entity_model;
use crate::schema::SchemaProfile;

pub mod decl {
    use crate::schema::{ClassDecl, FieldDecl, FieldShape};

    pub const PERSON: ClassDecl = ClassDecl {
        name: "Person",
        description: None,
        is_a: None,
        category: Some("Person"),
        fields: &[
            FieldDecl { name: "id", shape: FieldShape::Text },
            FieldDecl { name: "name", shape: FieldShape::Text },
        ],
    };

    pub const ONTOLOGIST: ClassDecl = ClassDecl {
        name: "Ontologist",
        description: Some("A person who builds ontologies"),
        is_a: Some(&PERSON),
        category: Some("Ontologist"),
        fields: &[FieldDecl { name: "favorite_animals", shape: FieldShape::TextList }],
    };

    pub const PROGRAMMER: ClassDecl = ClassDecl {
        name: "Programmer",
        description: Some("A person who used to search stackoverflow a lot"),
        is_a: Some(&PERSON),
        category: Some("Programmer"),
        fields: &[FieldDecl { name: "favorite_plants", shape: FieldShape::TextList }],
    };
}

pub const PROFILE: SchemaProfile = SchemaProfile {
    name: "basic",
    classes: &[&decl::PERSON, &decl::ONTOLOGIST, &decl::PROGRAMMER],
};

#[entity_model(class = decl::PERSON)]
pub struct Person {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A person who builds ontologies.
#[entity_model(class = decl::ONTOLOGIST)]
pub struct Ontologist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub favorite_animals: Vec<String>,
}

/// A person who used to search stackoverflow a lot.
#[entity_model(class = decl::PROGRAMMER)]
pub struct Programmer {
    pub id: Option<String>,
    pub name: Option<String>,
    pub favorite_plants: Vec<String>,
}

upcast!(Ontologist => Person, Programmer => Person);
canonicalizer!(Person, Ontologist, Programmer);
