pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod key_value_store;
    }
}

pub mod modules {
    pub mod earnings {
        pub mod core {
            pub mod accrual;
            pub mod decision;
            pub mod history;
            pub mod state;
            pub mod undo;
            pub mod wage_config;
        }
        pub mod use_cases {
            pub mod track_earnings {
                pub mod command;
                pub mod handler;
                pub mod timers;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod export_history {
                pub mod csv_export;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod reset_records;
            }
        }
    }
}

pub mod shell;
