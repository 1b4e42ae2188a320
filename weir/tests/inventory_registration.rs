#![cfg(feature = "inventory")]

use weir::{ComponentRegistration, Registry, RegistryBuilder};

fn install_greetings(builder: RegistryBuilder) -> RegistryBuilder {
    builder.namespace("greetings", |ns| ns.register("english", "Hello"))
}

weir::inventory::submit! {
    ComponentRegistration { name: "greetings", install: install_greetings }
}

#[test]
fn test_submitted_components_are_installed() {
    let registry = Registry::builder()
        .register("greetings.french", "Bonjour")
        .with_submitted()
        .build();

    assert_eq!(
        registry.resolve("greetings.english").unwrap().as_str(),
        Some("Hello")
    );
    assert_eq!(
        registry.resolve("greetings.french").unwrap().as_str(),
        Some("Bonjour")
    );
}
