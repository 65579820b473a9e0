use proptest::prelude::*;
use roster_model::prelude::*;
use roster_model::profiles::{basic, demo};

fn text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 ]{0,16}")
}

proptest! {
    #[test]
    fn roundtrip_programmer_fields(
        id in text(),
        name in text(),
        plants in proptest::collection::vec("[a-z]{1,12}", 0..8),
    ) {
        let mut programmer = basic::Programmer::builder().favorite_plants(plants).build();
        programmer.id = id;
        programmer.name = name;

        let rebuilt = basic::Programmer::from_fields(programmer.to_fields().unwrap()).unwrap();
        prop_assert_eq!(&rebuilt, &programmer);

        let encoded = serde_json::to_string(&programmer).unwrap();
        let decoded: basic::Programmer = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, programmer);
    }

    #[test]
    fn roundtrip_container_of_chefs(names in proptest::collection::vec(text(), 0..6)) {
        let mut container = demo::Container::default();
        for name in names {
            let mut fungi = demo::Fungi::default();
            fungi.name.clone_from(&name);
            let mut chef = demo::Chef::builder().favorite_fungi(vec![fungi]).build();
            chef.name = name;
            container.push_person(chef);
        }

        let rebuilt = demo::Container::from_fields(container.to_fields().unwrap()).unwrap();
        prop_assert_eq!(rebuilt.people.len(), container.people.len());
        prop_assert_eq!(rebuilt, container);
    }
}
