mod compatibility;
