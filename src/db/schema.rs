//! SQL DDL for creating and dropping the marketplace schema.
//! PostgreSQL-first design; enumerated types are declared before the
//! tables that use them, parent tables before children.

/// Full schema batch: nine enumerated types, then thirteen tables in
/// foreign-key dependency order. `users` doubles as the existence marker
/// checked by the bootstrap orchestrator.
pub const SCHEMA_INIT: &str = r#"
CREATE TYPE user_role AS ENUM ('admin', 'user', 'builder');
CREATE TYPE application_type AS ENUM ('builder', 'showcase');
CREATE TYPE application_status AS ENUM ('pending', 'approved', 'rejected');
CREATE TYPE build_status AS ENUM ('draft', 'in_progress', 'completed', 'showcase');
CREATE TYPE build_type AS ENUM ('gaming', 'workstation', 'server', 'custom');
CREATE TYPE availability_status AS ENUM ('in_stock', 'out_of_stock', 'discontinued');
CREATE TYPE request_status AS ENUM ('open', 'in_progress', 'fulfilled', 'cancelled');
CREATE TYPE offer_status AS ENUM ('pending', 'accepted', 'declined', 'withdrawn');
CREATE TYPE inquiry_status AS ENUM ('new', 'contacted', 'closed');

CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    display_name VARCHAR(100) NOT NULL,
    role user_role NOT NULL DEFAULT 'user',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE builder_profiles (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    business_name VARCHAR(120) NOT NULL,
    bio TEXT,
    portal_password_hash VARCHAR(255) NOT NULL,
    verified BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE builder_applications (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    application_type application_type NOT NULL,
    status application_status NOT NULL DEFAULT 'pending',
    message TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE part_categories (
    id SERIAL PRIMARY KEY,
    name VARCHAR(80) NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE parts (
    id SERIAL PRIMARY KEY,
    category_id INTEGER NOT NULL REFERENCES part_categories(id),
    name VARCHAR(160) NOT NULL,
    manufacturer VARCHAR(80) NOT NULL,
    price NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
    availability availability_status NOT NULL DEFAULT 'in_stock',
    spec_summary TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE builds (
    id SERIAL PRIMARY KEY,
    builder_id INTEGER NOT NULL REFERENCES builder_profiles(id) ON DELETE CASCADE,
    title VARCHAR(160) NOT NULL,
    description TEXT,
    build_type build_type NOT NULL DEFAULT 'custom',
    status build_status NOT NULL DEFAULT 'draft',
    total_price NUMERIC(10, 2),
    featured BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE build_parts (
    build_id INTEGER NOT NULL REFERENCES builds(id) ON DELETE CASCADE,
    part_id INTEGER NOT NULL REFERENCES parts(id),
    quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity > 0),
    PRIMARY KEY (build_id, part_id)
);

CREATE TABLE build_requests (
    id SERIAL PRIMARY KEY,
    requester_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(160) NOT NULL,
    details TEXT,
    build_type build_type NOT NULL DEFAULT 'custom',
    budget NUMERIC(10, 2),
    status request_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE builder_offers (
    id SERIAL PRIMARY KEY,
    request_id INTEGER NOT NULL REFERENCES build_requests(id) ON DELETE CASCADE,
    builder_id INTEGER NOT NULL REFERENCES builder_profiles(id) ON DELETE CASCADE,
    amount NUMERIC(10, 2) NOT NULL,
    message TEXT,
    status offer_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE showcase_inquiries (
    id SERIAL PRIMARY KEY,
    build_id INTEGER NOT NULL REFERENCES builds(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL,
    message TEXT NOT NULL,
    status inquiry_status NOT NULL DEFAULT 'new',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE ratings (
    id SERIAL PRIMARY KEY,
    build_id INTEGER NOT NULL REFERENCES builds(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    score INTEGER NOT NULL CHECK (score BETWEEN 1 AND 5),
    review TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (build_id, user_id)
);

CREATE TABLE comments (
    id SERIAL PRIMARY KEY,
    build_id INTEGER NOT NULL REFERENCES builds(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    body TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE likes (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    build_id INTEGER NOT NULL REFERENCES builds(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (user_id, build_id)
);
"#;

/// Destructive teardown batch. Children are dropped before their parents,
/// tables before the enumerated types they reference, with CASCADE to
/// sweep dependents either way.
pub const SCHEMA_DROP: &str = r#"
DROP TABLE IF EXISTS likes CASCADE;
DROP TABLE IF EXISTS comments CASCADE;
DROP TABLE IF EXISTS ratings CASCADE;
DROP TABLE IF EXISTS showcase_inquiries CASCADE;
DROP TABLE IF EXISTS builder_offers CASCADE;
DROP TABLE IF EXISTS build_requests CASCADE;
DROP TABLE IF EXISTS build_parts CASCADE;
DROP TABLE IF EXISTS builds CASCADE;
DROP TABLE IF EXISTS parts CASCADE;
DROP TABLE IF EXISTS part_categories CASCADE;
DROP TABLE IF EXISTS builder_applications CASCADE;
DROP TABLE IF EXISTS builder_profiles CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS user_role CASCADE;
DROP TYPE IF EXISTS application_type CASCADE;
DROP TYPE IF EXISTS application_status CASCADE;
DROP TYPE IF EXISTS build_status CASCADE;
DROP TYPE IF EXISTS build_type CASCADE;
DROP TYPE IF EXISTS availability_status CASCADE;
DROP TYPE IF EXISTS request_status CASCADE;
DROP TYPE IF EXISTS offer_status CASCADE;
DROP TYPE IF EXISTS inquiry_status CASCADE;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn names_after(sql: &str, keyword: &str) -> Vec<String> {
        sql.lines()
            .filter_map(|line| {
                let line = line.trim();
                line.strip_prefix(keyword).map(|rest| {
                    rest.trim_start()
                        .split([' ', '('])
                        .next()
                        .unwrap()
                        .to_string()
                })
            })
            .collect()
    }

    #[test]
    fn drop_batch_covers_every_created_table() {
        let created = names_after(SCHEMA_INIT, "CREATE TABLE");
        let dropped = names_after(SCHEMA_DROP, "DROP TABLE IF EXISTS");
        assert_eq!(created.len(), 13);
        for table in &created {
            assert!(dropped.contains(table), "no DROP TABLE for {table}");
        }
        assert_eq!(created.len(), dropped.len());
    }

    #[test]
    fn drop_batch_covers_every_created_type() {
        let created = names_after(SCHEMA_INIT, "CREATE TYPE");
        let dropped = names_after(SCHEMA_DROP, "DROP TYPE IF EXISTS");
        assert_eq!(created.len(), 9);
        for ty in &created {
            assert!(dropped.contains(ty), "no DROP TYPE for {ty}");
        }
        assert_eq!(created.len(), dropped.len());
    }

    #[test]
    fn types_are_declared_before_any_table() {
        let first_table = SCHEMA_INIT.find("CREATE TABLE").unwrap();
        let last_type = SCHEMA_INIT.rfind("CREATE TYPE").unwrap();
        assert!(last_type < first_table);
    }

    #[test]
    fn parent_tables_precede_their_children() {
        let order = names_after(SCHEMA_INIT, "CREATE TABLE");
        let pos = |name: &str| order.iter().position(|t| t == name).unwrap();
        assert!(pos("users") < pos("builder_profiles"));
        assert!(pos("builder_profiles") < pos("builds"));
        assert!(pos("part_categories") < pos("parts"));
        assert!(pos("parts") < pos("build_parts"));
        assert!(pos("builds") < pos("build_parts"));
        assert!(pos("build_requests") < pos("builder_offers"));
        assert!(pos("builds") < pos("ratings"));
    }
}
