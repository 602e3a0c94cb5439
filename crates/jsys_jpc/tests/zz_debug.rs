mod common;

use common::sample_container;
use jsys_jpc::Container;
use tracing_test::traced_test;

#[traced_test]
#[test]
fn debug_splice() {
    tracing::warn!("manual test warn");
    let container = sample_container(1);
    let mut bytes = container.to_bytes().unwrap();
    println!("total len {}", bytes.len());
    println!("bytes[0x10..0x20] = {:02x?}", &bytes[0x10..0x20]);

    let mut spliced = bytes[..0x18].to_vec();
    spliced.extend_from_slice(b"DMY1");
    spliced.extend_from_slice(&8u32.to_be_bytes());
    spliced.extend_from_slice(&bytes[0x18..]);
    bytes = spliced;
    bytes[0x13] += 1;
    let table_offset = u32::from_be_bytes([bytes[0x0C], bytes[0x0D], bytes[0x0E], bytes[0x0F]]);
    bytes[0x0C..0x10].copy_from_slice(&(table_offset + 8).to_be_bytes());

    println!("spliced[0x10..0x28] = {:02x?}", &bytes[0x10..0x28]);

    let decoded = Container::from_bytes(&bytes).unwrap();
    println!("resources: {}", decoded.resources.len());
    println!("logs_contain skip: {}", tracing_test::internal::logs_with_scope_contain("", "skipping unknown block tag"));
    println!("raw logs: {}", String::from_utf8_lossy(&tracing_test::internal::global_buf().lock().unwrap()));
}
