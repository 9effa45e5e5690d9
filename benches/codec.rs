use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use uvlink::schema::dialects;
use uvlink::{fields, FieldMap, FrameBuilder, FrameParser, MessageCatalog, WireVersion};

fn catalog() -> MessageCatalog {
    MessageCatalog::from_documents(&[dialects::common(), dialects::ardupilotmega()]).unwrap()
}

fn attitude_fields() -> FieldMap {
    fields([
        ("time_boot_ms", 30u32.into()),
        ("roll", 0.1f32.into()),
        ("pitch", 0.2f32.into()),
        ("yaw", 0.3f32.into()),
        ("rollspeed", 0.4f32.into()),
        ("pitchspeed", 0.5f32.into()),
        ("yawspeed", 0.6f32.into()),
    ])
}

fn gps_status_fields() -> FieldMap {
    let column: Vec<u8> = (0..20).collect();
    fields([
        ("satellites_visible", 20u8.into()),
        ("satellite_prn", column.clone().into()),
        ("satellite_used", column.clone().into()),
        ("satellite_elevation", column.clone().into()),
        ("satellite_azimuth", column.clone().into()),
        ("satellite_snr", column.into()),
    ])
}

fn bench_build(c: &mut Criterion) {
    let catalog = catalog();
    let mut group = c.benchmark_group("codec");

    let attitude = attitude_fields();
    group.throughput(Throughput::Bytes(36));
    group.bench_function("build_attitude", |b| {
        let mut builder = FrameBuilder::new(WireVersion::V1_0, 1, 1);
        b.iter(|| {
            black_box(builder.build(&catalog, "ATTITUDE", &attitude).unwrap());
        });
    });

    let gps_status = gps_status_fields();
    group.throughput(Throughput::Bytes(109));
    group.bench_function("build_gps_status", |b| {
        let mut builder = FrameBuilder::new(WireVersion::V1_0, 1, 1);
        b.iter(|| {
            black_box(builder.build(&catalog, "GPS_STATUS", &gps_status).unwrap());
        });
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let catalog = catalog();
    let mut group = c.benchmark_group("codec");

    let mut builder = FrameBuilder::new(WireVersion::V1_0, 1, 1);
    let attitude = builder
        .build(&catalog, "ATTITUDE", &attitude_fields())
        .unwrap();
    let bytes = attitude.as_bytes().to_vec();

    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("parse_attitude", |b| {
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);
        b.iter(|| {
            black_box(parser.feed(&bytes, &catalog));
        });
    });

    // Worst-case chunking: one byte per feed call.
    group.bench_function("parse_attitude_per_byte", |b| {
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);
        b.iter(|| {
            for &byte in &bytes {
                black_box(parser.feed(&[byte], &catalog));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_parse);
criterion_main!(benches);
