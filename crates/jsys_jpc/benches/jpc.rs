use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

#[path = "../tests/common/mod.rs"]
mod common;

fn main() {
    divan::main();
}

pub mod read {
    use divan::Bencher;
    use jsys_jpc::Container;

    fn get_input() -> Vec<u8> {
        crate::common::sample_container(64).to_bytes().unwrap()
    }

    #[divan::bench]
    fn parse_container(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            divan::black_box(Container::from_bytes(data).unwrap());
        });
    }
}

pub mod write {
    use divan::Bencher;
    use jsys_jpc::Container;

    #[divan::bench]
    fn encode_container(bencher: Bencher) {
        bencher
            .with_inputs(|| crate::common::sample_container(64))
            .bench_refs(|container: &mut Container| {
                divan::black_box(container.to_bytes().unwrap());
            });
    }
}
