pub mod bank_link;
