//! Generates Swift and Kotlin bindings from the compiled `ticketkit` library.

fn main() {
    uniffi::uniffi_bindgen_main();
}
