#![no_main]

use ebiconv::core::{ConverterConfig, ErrorList};
use ebiconv::ebinterface::EbiInvoice;
use ebiconv::from_ubl::UblToEbInterfaceConverter;
use ebiconv::to_ubl::EbInterfaceToUblConverter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // ebInterface → UBL → ebInterface must not panic, and the invoice
    // number survives.
    if let Ok(invoice) = serde_json::from_slice::<EbiInvoice>(data) {
        let doc = EbInterfaceToUblConverter::new().convert(&invoice);
        let mut errors = ErrorList::new();
        let converter = UblToEbInterfaceConverter::new(ConverterConfig::default());
        if let Ok(Some(back)) = converter.convert(&doc, &mut errors) {
            let trimmed = invoice.invoice_number.as_deref().map(str::trim).filter(|n| !n.is_empty());
            assert_eq!(back.invoice_number.as_deref(), trimmed);
        }
    }
});
