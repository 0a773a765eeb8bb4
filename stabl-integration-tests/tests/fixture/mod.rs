pub mod stabl_fixture;
