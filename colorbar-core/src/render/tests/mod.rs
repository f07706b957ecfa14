mod json_tests;
