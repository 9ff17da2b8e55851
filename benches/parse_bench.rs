use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rescuelog::LogParser;

const SYMBOLS: [char; 5] = ['+', '-', '*', '/', '?'];

fn synthetic_mapfile(records: usize) -> String {
    let mut out = String::from("# Rescue Logfile.\n# current_pos  current_status\n0x00000000     ?\n");
    out.push_str("#      pos        size  status\n");
    let mut offset = 0u64;
    for i in 0..records {
        let size = 0x200 * (1 + (i as u64 % 16));
        out.push_str(&format!(
            "0x{:010X}  0x{:08X}  {}\n",
            offset,
            size,
            SYMBOLS[i % SYMBOLS.len()]
        ));
        offset += size;
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let input = synthetic_mapfile(100_000);
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("from_reader_100k", |b| {
        b.iter(|| LogParser::from_reader(black_box(input.as_bytes())).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
