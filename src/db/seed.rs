//! Seed statement template and the credential hashing that feeds it.
//!
//! The template is a hand-authored multi-statement INSERT script carrying
//! bcrypt-shaped placeholder tokens. Rendering replaces every occurrence
//! of each token with a hash computed at bootstrap time; a token left
//! unreplaced is a fatal configuration error, never silently shipped to
//! the database.

use crate::error::MarketError;

/// Default credentials seeded into a fresh database. Demo data only:
/// every non-admin account deliberately shares the one generic password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_USER_PASSWORD: &str = "password123";

/// bcrypt work factor for seeded credentials.
pub const HASH_COST: u32 = 10;

/// Every placeholder token starts with this bcrypt-shaped prefix so the
/// un-rendered template still satisfies the password column width.
const PLACEHOLDER_PREFIX: &str = "$2b$10$placeholder_";

pub const ADMIN_HASH_PLACEHOLDER: &str =
    "$2b$10$placeholder_admin_hash_will_be_set_by_seed_script__";
pub const USER1_HASH_PLACEHOLDER: &str =
    "$2b$10$placeholder_user1_hash_will_be_set_by_seed_script__";
pub const USER2_HASH_PLACEHOLDER: &str =
    "$2b$10$placeholder_user2_hash_will_be_set_by_seed_script__";
pub const BUILD1_HASH_PLACEHOLDER: &str =
    "$2b$10$placeholder_build1_hash_will_be_set_by_seed_script";
pub const BUILD2_HASH_PLACEHOLDER: &str =
    "$2b$10$placeholder_build2_hash_will_be_set_by_seed_script";

/// Compute the per-run hash values for all five placeholder tokens.
///
/// One bcrypt invocation per distinct plaintext: the admin hash is unique,
/// the generic user hash is computed once and reused for the four
/// non-admin tokens. Two tokens may therefore carry the identical value
/// while remaining distinct tokens in the template.
pub fn seed_hashes() -> Result<Vec<(&'static str, String)>, MarketError> {
    let admin_hash = bcrypt::hash(DEFAULT_ADMIN_PASSWORD, HASH_COST)?;
    let user_hash = bcrypt::hash(DEFAULT_USER_PASSWORD, HASH_COST)?;

    Ok(vec![
        (ADMIN_HASH_PLACEHOLDER, admin_hash),
        (USER1_HASH_PLACEHOLDER, user_hash.clone()),
        (USER2_HASH_PLACEHOLDER, user_hash.clone()),
        (BUILD1_HASH_PLACEHOLDER, user_hash.clone()),
        (BUILD2_HASH_PLACEHOLDER, user_hash),
    ])
}

/// Substitute every occurrence of every token, then verify nothing
/// placeholder-shaped survives in the rendered batch.
pub fn render_seed(template: &str, hashes: &[(&str, String)]) -> Result<String, MarketError> {
    let mut rendered = template.to_string();
    for (token, value) in hashes {
        rendered = rendered.replace(token, value);
    }
    if let Some(token) = first_unresolved(&rendered) {
        return Err(MarketError::UnresolvedPlaceholder(token));
    }
    Ok(rendered)
}

fn first_unresolved(sql: &str) -> Option<String> {
    let start = sql.find(PLACEHOLDER_PREFIX)?;
    let rest = &sql[start + PLACEHOLDER_PREFIX.len()..];
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .unwrap_or(rest.len());
    Some(format!("{PLACEHOLDER_PREFIX}{}", &rest[..end]))
}

/// Deterministic seed batch: three accounts, two builder profiles, the
/// part catalog and two showcase builds. Row ids are literal because the
/// batch only ever runs against a freshly created schema.
pub const SEED_TEMPLATE: &str = r#"
INSERT INTO users (email, password_hash, display_name, role) VALUES
    ('admin@rigmarket.dev', '$2b$10$placeholder_admin_hash_will_be_set_by_seed_script__', 'Site Admin', 'admin'),
    ('nova@novacustoms.dev', '$2b$10$placeholder_user1_hash_will_be_set_by_seed_script__', 'Nova Reyes', 'builder'),
    ('milo@apexrigs.dev', '$2b$10$placeholder_user2_hash_will_be_set_by_seed_script__', 'Milo Tanaka', 'builder');

INSERT INTO builder_profiles (user_id, business_name, bio, portal_password_hash, verified) VALUES
    (2, 'Nova Customs', 'Small-form-factor specialist focused on quiet air-cooled builds.', '$2b$10$placeholder_build1_hash_will_be_set_by_seed_script', TRUE),
    (3, 'Apex Rigs', 'Water-cooled workstation builds for creators and engineers.', '$2b$10$placeholder_build2_hash_will_be_set_by_seed_script', TRUE);

INSERT INTO part_categories (name, description) VALUES
    ('CPU', 'Processors'),
    ('GPU', 'Graphics cards'),
    ('Motherboard', 'Mainboards and chipsets'),
    ('Memory', 'RAM kits'),
    ('Storage', 'SSDs and hard drives'),
    ('Power Supply', 'PSUs'),
    ('Case', 'Enclosures'),
    ('Cooling', 'Air and liquid cooling');

INSERT INTO parts (category_id, name, manufacturer, price, availability, spec_summary) VALUES
    (1, 'Ryzen 9 7950X', 'AMD', 579.00, 'in_stock', '16 cores and 32 threads at up to 5.7 GHz boost'),
    (1, 'Core i7-14700K', 'Intel', 399.00, 'in_stock', '20 cores with hybrid architecture'),
    (2, 'GeForce RTX 4080 Super', 'NVIDIA', 999.00, 'in_stock', '16 GB GDDR6X'),
    (2, 'Radeon RX 7900 XTX', 'AMD', 899.00, 'out_of_stock', '24 GB GDDR6'),
    (3, 'MAG X670E Tomahawk', 'MSI', 319.00, 'in_stock', 'AM5 ATX with PCIe 5.0'),
    (4, 'Trident Z5 64GB DDR5-6000', 'G.Skill', 229.00, 'in_stock', '2x32GB CL30 kit'),
    (5, '990 Pro 2TB NVMe', 'Samsung', 169.00, 'in_stock', 'PCIe 4.0 at 7450 MB/s read'),
    (6, 'RM1000x Shift', 'Corsair', 249.00, 'in_stock', '1000W 80 Plus Gold modular'),
    (7, 'O11 Dynamic EVO', 'Lian Li', 169.00, 'in_stock', 'Dual-chamber mid tower'),
    (8, 'Liquid Freezer III 360', 'Arctic', 139.00, 'discontinued', '360mm AIO liquid cooler');

INSERT INTO builds (builder_id, title, description, build_type, status, total_price, featured) VALUES
    (1, 'Midnight SFF Gaming Rig', 'Compact 4080-class gaming build tuned for near-silent operation.', 'gaming', 'showcase', 2450.00, TRUE),
    (2, 'Hydra Creator Workstation', 'Dual-loop water-cooled editing workstation with 64 GB of memory.', 'workstation', 'completed', 3899.00, FALSE);

INSERT INTO build_parts (build_id, part_id, quantity) VALUES
    (1, 1, 1),
    (1, 3, 1),
    (1, 6, 1),
    (1, 8, 1),
    (1, 9, 1),
    (2, 2, 1),
    (2, 5, 1),
    (2, 6, 1),
    (2, 7, 2),
    (2, 10, 1);

INSERT INTO showcase_inquiries (build_id, name, email, message, status) VALUES
    (1, 'Avery Chen', 'avery@example.com', 'Could you do this build with a white case instead of black', 'new');
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PLACEHOLDERS: [&str; 5] = [
        ADMIN_HASH_PLACEHOLDER,
        USER1_HASH_PLACEHOLDER,
        USER2_HASH_PLACEHOLDER,
        BUILD1_HASH_PLACEHOLDER,
        BUILD2_HASH_PLACEHOLDER,
    ];

    #[test]
    fn template_declares_every_placeholder_exactly_once() {
        for token in ALL_PLACEHOLDERS {
            assert_eq!(
                SEED_TEMPLATE.matches(token).count(),
                1,
                "token {token} should appear exactly once"
            );
        }
    }

    #[test]
    fn no_placeholder_is_a_prefix_of_another() {
        for (i, a) in ALL_PLACEHOLDERS.iter().enumerate() {
            for (j, b) in ALL_PLACEHOLDERS.iter().enumerate() {
                if i != j {
                    assert!(!a.starts_with(b), "{b} is a prefix of {a}");
                }
            }
        }
    }

    #[test]
    fn render_replaces_every_occurrence_of_a_token() {
        let template = format!(
            "a {token} b {token} c",
            token = ADMIN_HASH_PLACEHOLDER
        );
        let rendered =
            render_seed(&template, &[(ADMIN_HASH_PLACEHOLDER, "HASH".to_string())]).unwrap();
        assert_eq!(rendered, "a HASH b HASH c");
    }

    #[test]
    fn render_rejects_a_token_without_a_value() {
        let template = format!("{} and {}", ADMIN_HASH_PLACEHOLDER, USER1_HASH_PLACEHOLDER);
        let err = render_seed(&template, &[(ADMIN_HASH_PLACEHOLDER, "HASH".to_string())])
            .unwrap_err();
        match err {
            MarketError::UnresolvedPlaceholder(token) => {
                assert_eq!(token, USER1_HASH_PLACEHOLDER);
            }
            other => panic!("expected UnresolvedPlaceholder, got {other}"),
        }
    }

    #[test]
    fn non_admin_accounts_share_one_hash_and_admin_differs() {
        let hashes = seed_hashes().unwrap();
        assert_eq!(hashes.len(), 5);

        let admin = &hashes[0].1;
        let generic = &hashes[1].1;
        for (token, value) in &hashes[1..] {
            assert_eq!(value, generic, "token {token} should carry the shared hash");
        }
        assert_ne!(admin, generic);

        assert!(bcrypt::verify(DEFAULT_ADMIN_PASSWORD, admin).unwrap());
        assert!(bcrypt::verify(DEFAULT_USER_PASSWORD, generic).unwrap());
    }

    #[test]
    fn rendered_template_contains_no_raw_tokens() {
        let hashes = seed_hashes().unwrap();
        let rendered = render_seed(SEED_TEMPLATE, &hashes).unwrap();
        assert!(!rendered.contains("placeholder_"));
        for (_, value) in &hashes {
            assert!(rendered.contains(value.as_str()));
        }
    }
}
