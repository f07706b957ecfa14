mod pid_tests;
