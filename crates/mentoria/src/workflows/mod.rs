pub mod mentorship;
