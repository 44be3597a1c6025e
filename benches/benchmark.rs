use criterion::{criterion_group, criterion_main, Criterion};
use kyber_kex::traits::KeyGen;
use kyber_kex::{kyber_1024, kyber_512, kyber_768};


pub fn criterion_benchmark(c: &mut Criterion) {
    let seed = [0x42u8; 32];

    let (a512, _) = kyber_512::generate_matrix_from_seed(&seed).unwrap();
    let s512 = kyber_512::generate_private_key_from_seed(&seed);
    let e512 = kyber_512::generate_error_from_seed(&seed);
    let pk512 = kyber_512::generate_public_key(&a512, &s512, &e512);

    let (a768, _) = kyber_768::generate_matrix_from_seed(&seed).unwrap();
    let s768 = kyber_768::generate_private_key_from_seed(&seed);
    let e768 = kyber_768::generate_error_from_seed(&seed);
    let pk768 = kyber_768::generate_public_key(&a768, &s768, &e768);

    let (a1024, _) = kyber_1024::generate_matrix_from_seed(&seed).unwrap();
    let s1024 = kyber_1024::generate_private_key_from_seed(&seed);
    let e1024 = kyber_1024::generate_error_from_seed(&seed);
    let pk1024 = kyber_1024::generate_public_key(&a1024, &s1024, &e1024);


    c.bench_function("kyber_512 matrix", |b| b.iter(|| kyber_512::KG::try_generate_matrix()));
    c.bench_function("kyber_512 private key", |b| b.iter(|| kyber_512::KG::try_generate_private_key()));
    c.bench_function("kyber_512 public key", |b| {
        b.iter(|| kyber_512::generate_public_key(&a512, &s512, &e512))
    });
    c.bench_function("kyber_512 shared secret", |b| {
        b.iter(|| kyber_512::calculate_shared_secret(&pk512, &s512))
    });

    c.bench_function("kyber_768 matrix", |b| b.iter(|| kyber_768::KG::try_generate_matrix()));
    c.bench_function("kyber_768 private key", |b| b.iter(|| kyber_768::KG::try_generate_private_key()));
    c.bench_function("kyber_768 public key", |b| {
        b.iter(|| kyber_768::generate_public_key(&a768, &s768, &e768))
    });
    c.bench_function("kyber_768 shared secret", |b| {
        b.iter(|| kyber_768::calculate_shared_secret(&pk768, &s768))
    });

    c.bench_function("kyber_1024 matrix", |b| b.iter(|| kyber_1024::KG::try_generate_matrix()));
    c.bench_function("kyber_1024 private key", |b| b.iter(|| kyber_1024::KG::try_generate_private_key()));
    c.bench_function("kyber_1024 public key", |b| {
        b.iter(|| kyber_1024::generate_public_key(&a1024, &s1024, &e1024))
    });
    c.bench_function("kyber_1024 shared secret", |b| {
        b.iter(|| kyber_1024::calculate_shared_secret(&pk1024, &s1024))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

// cargo bench
