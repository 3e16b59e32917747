pub const ADMIN_ROLE: &str = "Admin";

pub mod api {

    pub const DEFAULT_URL: &str = "http://127.0.0.1:9000/api";

    /// Graylog's root account; only its password is configurable.
    pub const USERNAME: &str = "admin";

    pub const REQUESTED_BY_HEADER: &str = "X-Requested-By";

    pub const REQUESTED_BY: &str = "graylog-configurer";

    pub const USERS_PATH: &str = "/users";
}

pub mod users {

    pub const DEFAULT_EMAIL_DOMAIN: &str = "utilitywarehouse.co.uk";

    pub const PASSWORD_BYTES: usize = 30;
}

pub mod intervals {
    use std::time::Duration;

    pub const API_POLL: Duration = Duration::from_secs(3);
}

pub mod env {

    pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

    pub const ADMINS: &str = "ADMINS";

    pub const API_URL: &str = "GRAYLOG_API_URL";
}
