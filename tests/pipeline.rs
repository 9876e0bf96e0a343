//! End-to-end tests for the encrypt/decrypt folder pipeline.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

use pgpvault::crypto::keyring;
use pgpvault::pipeline::{decrypt_folder, encrypt_folder};

const USER: &str = "pipeline@example.com";
const PASS: &str = "test passphrase";

/// One RSA generation shared by all tests; each test gets its own
/// copies of the ring files.
fn ring_files() -> &'static (Vec<u8>, Vec<u8>) {
    static RINGS: OnceLock<(Vec<u8>, Vec<u8>)> = OnceLock::new();
    RINGS.get_or_init(|| {
        let tmp = TempDir::new().unwrap();
        let public = tmp.path().join("public.asc");
        let secret = tmp.path().join("secret.asc");
        keyring::create_key_ring(&public, &secret, USER, PASS).unwrap();
        (fs::read(&public).unwrap(), fs::read(&secret).unwrap())
    })
}

struct Fixture {
    _tmp: TempDir,
    public_ring: PathBuf,
    secret_ring: PathBuf,
    generated: PathBuf,
    encrypted: PathBuf,
    decrypted: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let (public, secret) = ring_files();
        let public_ring = tmp.path().join("public.asc");
        let secret_ring = tmp.path().join("secret.asc");
        fs::write(&public_ring, public).unwrap();
        fs::write(&secret_ring, secret).unwrap();

        let generated = tmp.path().join("generated");
        let encrypted = tmp.path().join("encrypted");
        let decrypted = tmp.path().join("decrypted");
        fs::create_dir_all(&generated).unwrap();
        fs::create_dir_all(&encrypted).unwrap();
        fs::create_dir_all(&decrypted).unwrap();

        Self {
            _tmp: tmp,
            public_ring,
            secret_ring,
            generated,
            encrypted,
            decrypted,
        }
    }

    fn write_plaintext(&self, name: &str, data: &[u8]) {
        fs::write(self.generated.join(name), data).unwrap();
    }

    fn encrypt(&self) -> pgpvault::pipeline::BatchSummary {
        encrypt_folder(&self.generated, &self.encrypted, &self.public_ring, USER).unwrap()
    }

    fn decrypt(&self, passphrase: &str) -> pgpvault::pipeline::BatchSummary {
        decrypt_folder(
            &self.encrypted,
            &self.decrypted,
            &self.secret_ring,
            USER,
            passphrase,
        )
        .unwrap()
    }
}

fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_roundtrip_restores_bytes_exactly() {
    let fx = Fixture::new();
    let content: Vec<u8> = (0..4096u32).flat_map(|i| i.to_le_bytes()).collect();
    fx.write_plaintext("report.txt", &content);

    let enc = fx.encrypt();
    assert_eq!(enc.processed, 1);
    assert!(enc.failed.is_empty());

    let armored = fs::read_to_string(fx.encrypted.join("report.txt.gpg")).unwrap();
    assert!(armored.starts_with("-----BEGIN PGP MESSAGE-----"));

    let dec = fx.decrypt(PASS);
    assert_eq!(dec.processed, 1);
    assert!(dec.failed.is_empty());

    let restored = fs::read(fx.decrypted.join("report.txt")).unwrap();
    assert_eq!(restored, content);

    // Sources are never deleted
    assert!(fx.generated.join("report.txt").exists());
    assert!(fx.encrypted.join("report.txt.gpg").exists());
}

#[test]
fn test_output_naming_follows_the_pipeline_rules() {
    let fx = Fixture::new();
    fx.write_plaintext("report.txt", b"quarterly numbers");
    fx.write_plaintext("invoice.pdf", b"%PDF-1.4 fake");

    fx.encrypt();
    assert_eq!(
        list_names(&fx.encrypted),
        vec!["invoice.pdf.gpg", "report.txt.gpg"]
    );

    fx.decrypt(PASS);
    // All extensions are stripped before .txt is appended
    assert_eq!(list_names(&fx.decrypted), vec!["invoice.txt", "report.txt"]);
    assert_eq!(
        fs::read(fx.decrypted.join("invoice.txt")).unwrap(),
        b"%PDF-1.4 fake"
    );
}

#[test]
fn test_empty_folder_returns_immediately_with_empty_summary() {
    let fx = Fixture::new();

    let enc = fx.encrypt();
    assert_eq!(enc.total(), 0);

    let dec = fx.decrypt(PASS);
    assert_eq!(dec.total(), 0);
    assert_eq!(list_names(&fx.decrypted).len(), 0);
}

#[test]
fn test_batch_yields_one_outcome_per_file() {
    let fx = Fixture::new();
    for i in 0..8 {
        fx.write_plaintext(&format!("file-{i}.txt"), format!("payload {i}").as_bytes());
    }

    let enc = fx.encrypt();
    assert_eq!(enc.total(), 8);
    assert_eq!(enc.processed, 8);

    let dec = fx.decrypt(PASS);
    assert_eq!(dec.total(), 8);
    assert_eq!(dec.processed, 8);
}

#[test]
fn test_corrupt_file_does_not_block_the_rest_of_the_batch() {
    let fx = Fixture::new();
    fx.write_plaintext("good-1.txt", b"one");
    fx.write_plaintext("good-2.txt", b"two");
    fx.encrypt();

    // A third ciphertext that is not a PGP message at all
    fs::write(fx.encrypted.join("broken.txt.gpg"), b"not armored").unwrap();

    let dec = fx.decrypt(PASS);
    assert_eq!(dec.total(), 3);
    assert_eq!(dec.processed, 2);
    assert_eq!(dec.failed.len(), 1);
    assert!(dec.failed[0].0.ends_with("broken.txt.gpg"));

    assert_eq!(list_names(&fx.decrypted), vec!["good-1.txt", "good-2.txt"]);
}

#[test]
fn test_wrong_passphrase_fails_every_file_deterministically() {
    let fx = Fixture::new();
    fx.write_plaintext("secret.txt", b"classified");
    fx.encrypt();

    let dec = fx.decrypt("wrong passphrase");
    assert_eq!(dec.processed, 0);
    assert_eq!(dec.failed.len(), 1);
    // Fail-closed: no output file is produced
    assert_eq!(list_names(&fx.decrypted).len(), 0);
}

#[test]
fn test_missing_source_folder_is_a_stage_error() {
    let fx = Fixture::new();
    fs::remove_dir(&fx.generated).unwrap();
    assert!(encrypt_folder(&fx.generated, &fx.encrypted, &fx.public_ring, USER).is_err());
}
