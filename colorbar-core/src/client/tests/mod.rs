mod controls_tests;
