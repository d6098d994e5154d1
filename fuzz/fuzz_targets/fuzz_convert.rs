#![no_main]

use ebiconv::core::{ConverterConfigBuilder, ErrorList};
use ebiconv::from_ubl::UblToEbInterfaceConverter;
use ebiconv::ubl::UblDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any document, valid or not, must convert without panicking.
    if let Ok(doc) = serde_json::from_slice::<UblDocument>(data) {
        for strict in [false, true] {
            let Ok(config) = ConverterConfigBuilder::new().strict_erb(strict).build() else {
                return;
            };
            let mut errors = ErrorList::new();
            let _ = UblToEbInterfaceConverter::new(config).convert(&doc, &mut errors);
            let _ = errors.to_string();
        }
    }
});
