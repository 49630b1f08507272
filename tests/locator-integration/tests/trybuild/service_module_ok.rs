use di_abstractions::{ModuleCatalog, TypeDescriptor};
use locator_integration_tests::ObjectStoreRegistrar;
use registrar_macros::service_module;

#[service_module(name = "trybuild-object-store", depends_on = ["identity", "network"])]
fn object_store_exports() -> Vec<TypeDescriptor> {
    vec![TypeDescriptor::registrar::<ObjectStoreRegistrar>()]
}

fn main() {
    let module = ModuleCatalog::global()
        .find("trybuild-object-store")
        .unwrap();
    assert_eq!(module.dependencies().len(), 2);
    assert_eq!(object_store_exports().len(), 1);
}
